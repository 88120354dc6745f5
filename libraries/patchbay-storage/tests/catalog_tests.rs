mod test_helpers;

use patchbay_storage::{catalog, CatalogFilter, StorageError};
use test_helpers::*;

#[tokio::test]
async fn test_unfiltered_search_returns_full_catalog_newest_first() {
    let db = TestDb::new().await;

    let older = create_test_preset(db.pool(), "Analog Bass").await;
    let middle = create_test_preset(db.pool(), "Dream Pad").await;
    let newest = create_test_preset(db.pool(), "Acid Lead").await;

    set_preset_created_at(db.pool(), &older.id, 1_000).await;
    set_preset_created_at(db.pool(), &middle.id, 2_000).await;
    set_preset_created_at(db.pool(), &newest.id, 3_000).await;

    let filter = CatalogFilter::from_params(None, None, None, None);
    assert!(filter.is_unfiltered());

    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id, newest.id);
    assert_eq!(results[1].id, middle.id);
    assert_eq!(results[2].id, older.id);
}

#[tokio::test]
async fn test_blank_params_do_not_constrain() {
    let db = TestDb::new().await;
    create_test_preset(db.pool(), "Anything").await;

    // Blank/comma-only parameters must not over-constrain to "match nothing"
    let filter = CatalogFilter::from_params(Some(""), Some(",,"), Some(" "), Some(""));
    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_term_matches_title_or_description_case_insensitively() {
    let db = TestDb::new().await;

    let by_title = create_test_preset(db.pool(), "FOOtwork Stab").await;
    let by_description = create_preset_with(db.pool(), "Warm Keys", |input| {
        input.description = Some("smooth Foo chords".to_string());
    })
    .await;
    create_test_preset(db.pool(), "Unrelated").await;

    let filter = CatalogFilter::from_params(Some("foo"), None, None, None);
    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    let ids: Vec<_> = results.iter().map(|p| p.id.clone()).collect();
    assert_eq!(results.len(), 2);
    assert!(ids.contains(&by_title.id));
    assert!(ids.contains(&by_description.id));
}

#[tokio::test]
async fn test_genre_filter_only_returns_members_of_the_list() {
    let db = TestDb::new().await;

    let techno = catalog::create_genre(db.pool(), "Techno").await.unwrap();
    let house = catalog::create_genre(db.pool(), "House").await.unwrap();
    let ambient = catalog::create_genre(db.pool(), "Ambient").await.unwrap();

    for (title, genre_id) in [
        ("A", techno.id),
        ("B", house.id),
        ("C", ambient.id),
        ("D", techno.id),
    ] {
        create_preset_with(db.pool(), title, |input| input.genre_id = Some(genre_id)).await;
    }

    let genres = format!("{},{}", techno.id, house.id);
    let filter = CatalogFilter::from_params(None, Some(&genres), None, None);
    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    assert_eq!(results.len(), 3);
    for preset in &results {
        let genre_id = preset.genre.as_ref().unwrap().id;
        assert!(genre_id == techno.id || genre_id == house.id);
    }
}

#[tokio::test]
async fn test_vst_filter_matches_through_joined_relation() {
    let db = TestDb::new().await;

    let serum = catalog::create_vst(db.pool(), "Serum").await.unwrap();
    let vital = catalog::create_vst(db.pool(), "Vital").await.unwrap();

    create_preset_with(db.pool(), "Serum Pluck", |input| {
        input.vst_id = Some(serum.id);
    })
    .await;
    create_preset_with(db.pool(), "Vital Pluck", |input| {
        input.vst_id = Some(vital.id);
    })
    .await;
    create_test_preset(db.pool(), "No VST").await;

    let filter = CatalogFilter::from_params(None, None, Some("Serum"), None);
    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].vst.as_ref().unwrap().name, "Serum");
}

#[tokio::test]
async fn test_preset_type_filter() {
    let db = TestDb::new().await;

    create_preset_with(db.pool(), "Sub", |input| {
        input.preset_type = "bass".to_string();
    })
    .await;
    create_preset_with(db.pool(), "Screech", |input| {
        input.preset_type = "lead".to_string();
    })
    .await;
    create_preset_with(db.pool(), "Riser", |input| {
        input.preset_type = "fx".to_string();
    })
    .await;

    let filter = CatalogFilter::from_params(None, None, None, Some("bass,fx"));
    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    assert_eq!(results.len(), 2);
    for preset in &results {
        assert!(preset.preset_type == "bass" || preset.preset_type == "fx");
    }
}

#[tokio::test]
async fn test_all_dimensions_are_conjunctive() {
    let db = TestDb::new().await;

    let techno = catalog::create_genre(db.pool(), "Techno").await.unwrap();
    let serum = catalog::create_vst(db.pool(), "Serum").await.unwrap();

    // Matches every dimension
    let full_match = create_preset_with(db.pool(), "Rolling Bassline", |input| {
        input.genre_id = Some(techno.id);
        input.vst_id = Some(serum.id);
        input.preset_type = "bass".to_string();
    })
    .await;
    // Matches all but the genre
    create_preset_with(db.pool(), "Rolling Bass Too", |input| {
        input.vst_id = Some(serum.id);
        input.preset_type = "bass".to_string();
    })
    .await;

    let genres = techno.id.to_string();
    let filter =
        CatalogFilter::from_params(Some("rolling"), Some(&genres), Some("Serum"), Some("bass"));
    let results = catalog::search(db.pool(), &filter, 50, 0).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, full_match.id);
}

#[tokio::test]
async fn test_search_enriches_designer_genre_and_vst() {
    let db = TestDb::new().await;

    let designer = create_test_designer(db.pool(), "wavecrafter").await;
    let genre = catalog::create_genre(db.pool(), "Dubstep").await.unwrap();
    let vst = catalog::create_vst(db.pool(), "Vital").await.unwrap();

    create_preset_with(db.pool(), "Growl", |input| {
        input.designer_id = Some(designer.id.clone());
        input.genre_id = Some(genre.id);
        input.vst_id = Some(vst.id);
    })
    .await;

    let results = catalog::search(db.pool(), &CatalogFilter::default(), 50, 0)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let preset = &results[0];
    assert_eq!(preset.designer.as_ref().unwrap().username, "wavecrafter");
    assert_eq!(preset.genre.as_ref().unwrap().name, "Dubstep");
    assert_eq!(preset.vst.as_ref().unwrap().name, "Vital");
}

#[tokio::test]
async fn test_search_pagination() {
    let db = TestDb::new().await;

    for i in 0..5 {
        let preset = create_test_preset(db.pool(), &format!("Preset {i}")).await;
        set_preset_created_at(db.pool(), &preset.id, 1_000 + i).await;
    }

    let filter = CatalogFilter::default();
    let first = catalog::search(db.pool(), &filter, 2, 0).await.unwrap();
    let second = catalog::search(db.pool(), &filter, 2, 2).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(first[0].title, "Preset 4");
    assert_eq!(second[0].title, "Preset 2");
}

#[tokio::test]
async fn test_pack_children_are_ordered_and_carry_preview_urls() {
    let db = TestDb::new().await;

    let pack = create_test_pack(db.pool(), "Future Bass Essentials", 4).await;

    assert_eq!(pack.presets.len(), 4);
    for (i, child) in pack.presets.iter().enumerate() {
        assert_eq!(child.position, i as i64);
        assert!(child.preview_url.is_some());
    }
}

#[tokio::test]
async fn test_designer_presets_exclude_pack_children() {
    let db = TestDb::new().await;

    let designer = create_test_designer(db.pool(), "bitflip").await;
    create_preset_with(db.pool(), "Standalone", |input| {
        input.designer_id = Some(designer.id.clone());
    })
    .await;

    let pack = catalog::create_pack(
        db.pool(),
        patchbay_core::CreatePack {
            title: "Pack".to_string(),
            description: None,
            price_cents: 999,
            designer_id: Some(designer.id.clone()),
            genre_id: None,
        },
    )
    .await
    .unwrap();
    create_preset_with(db.pool(), "Child", |input| {
        input.designer_id = Some(designer.id.clone());
        input.pack_id = Some(pack.id.clone());
        input.pack_position = Some(0);
    })
    .await;

    let presets = catalog::designer_presets(db.pool(), &designer.id)
        .await
        .unwrap();
    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0].title, "Standalone");

    let packs = catalog::designer_packs(db.pool(), &designer.id)
        .await
        .unwrap();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].presets.len(), 1);
}

#[tokio::test]
async fn test_delete_preset() {
    let db = TestDb::new().await;

    let preset = create_test_preset(db.pool(), "Doomed").await;
    catalog::delete_preset(db.pool(), &preset.id).await.unwrap();

    let results = catalog::search(db.pool(), &CatalogFilter::default(), 50, 0)
        .await
        .unwrap();
    assert!(results.is_empty());

    // Deleting again reports not found
    let err = catalog::delete_preset(db.pool(), &preset.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_pack_cascades_to_children() {
    let db = TestDb::new().await;

    let pack = create_test_pack(db.pool(), "Short Lived", 3).await;
    catalog::delete_pack(db.pool(), &pack.id).await.unwrap();

    let results = catalog::search(db.pool(), &CatalogFilter::default(), 50, 0)
        .await
        .unwrap();
    assert!(results.is_empty());
}

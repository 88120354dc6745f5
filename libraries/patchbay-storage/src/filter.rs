//! Catalog filter predicate builder
//!
//! Translates the optional search parameters of a catalog request into a
//! conjunctive WHERE clause. Each present, non-empty dimension contributes
//! exactly one conjunct; an absent dimension contributes nothing. When no
//! dimension is present the query is emitted without a WHERE clause at all,
//! so the no-filter case is syntactically a full unfiltered query rather
//! than an empty AND.

use patchbay_core::GenreId;
use sqlx::{QueryBuilder, Sqlite};

/// Parsed catalog search parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Free-text term matched case-insensitively against title and description
    pub term: Option<String>,
    /// Genre ids the result's genre must be a member of
    pub genres: Vec<GenreId>,
    /// VST names matched through the joined `vsts` relation
    pub vst_names: Vec<String>,
    /// Preset category tags
    pub preset_types: Vec<String>,
}

/// The fixed set of filter dimensions. Only dimensions that survive
/// [`CatalogFilter::dimensions`] reach the query builder.
enum Dimension<'a> {
    Term(&'a str),
    Genres(&'a [GenreId]),
    VstNames(&'a [String]),
    PresetTypes(&'a [String]),
}

impl CatalogFilter {
    /// Build a filter from raw query-parameter values.
    ///
    /// List parameters are comma-separated; blank segments are dropped and
    /// unparsable genre ids are skipped rather than failing the request.
    pub fn from_params(
        term: Option<&str>,
        genres: Option<&str>,
        vst_types: Option<&str>,
        preset_types: Option<&str>,
    ) -> Self {
        Self {
            term: term
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            genres: split_list(genres)
                .filter_map(|s| s.parse::<GenreId>().ok())
                .collect(),
            vst_names: split_list(vst_types).map(String::from).collect(),
            preset_types: split_list(preset_types).map(String::from).collect(),
        }
    }

    /// True when no dimension is present and the query runs unconstrained
    pub fn is_unfiltered(&self) -> bool {
        self.term.is_none()
            && self.genres.is_empty()
            && self.vst_names.is_empty()
            && self.preset_types.is_empty()
    }

    /// The present dimensions, in clause order. Empty dimensions are skipped
    /// here, which is what keeps "no filters => unfiltered query" mechanical.
    fn dimensions(&self) -> Vec<Dimension<'_>> {
        let mut dims = Vec::new();
        if let Some(term) = self.term.as_deref() {
            dims.push(Dimension::Term(term));
        }
        if !self.genres.is_empty() {
            dims.push(Dimension::Genres(&self.genres));
        }
        if !self.vst_names.is_empty() {
            dims.push(Dimension::VstNames(&self.vst_names));
        }
        if !self.preset_types.is_empty() {
            dims.push(Dimension::PresetTypes(&self.preset_types));
        }
        dims
    }

    /// Append the WHERE clause for this filter to a catalog query.
    ///
    /// Expects the base query to alias `presets` as `p` and the joined
    /// `vsts` relation as `v`.
    pub(crate) fn apply(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let dims = self.dimensions();
        if dims.is_empty() {
            return;
        }

        qb.push(" WHERE ");
        for (i, dim) in dims.into_iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            match dim {
                Dimension::Term(term) => {
                    let pattern = format!("%{}%", term.to_lowercase());
                    qb.push("(lower(p.title) LIKE ");
                    qb.push_bind(pattern.clone());
                    qb.push(" OR lower(p.description) LIKE ");
                    qb.push_bind(pattern);
                    qb.push(")");
                }
                Dimension::Genres(ids) => {
                    qb.push("p.genre_id IN (");
                    let mut sep = qb.separated(", ");
                    for id in ids {
                        sep.push_bind(*id);
                    }
                    sep.push_unseparated(")");
                }
                Dimension::VstNames(names) => {
                    qb.push("v.name IN (");
                    let mut sep = qb.separated(", ");
                    for name in names {
                        sep.push_bind(name.clone());
                    }
                    sep.push_unseparated(")");
                }
                Dimension::PresetTypes(types) => {
                    qb.push("p.preset_type IN (");
                    let mut sep = qb.separated(", ");
                    for preset_type in types {
                        sep.push_bind(preset_type.clone());
                    }
                    sep.push_unseparated(")");
                }
            }
        }
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_produce_unfiltered_query() {
        let filter = CatalogFilter::from_params(None, None, None, None);
        assert!(filter.is_unfiltered());

        let mut qb = QueryBuilder::new("SELECT 1 FROM presets p");
        filter.apply(&mut qb);
        assert_eq!(qb.sql(), "SELECT 1 FROM presets p");
    }

    #[test]
    fn blank_and_comma_only_params_are_treated_as_absent() {
        let filter = CatalogFilter::from_params(Some("  "), Some(",,"), Some(""), Some(" , "));
        assert!(filter.is_unfiltered());
    }

    #[test]
    fn parses_comma_separated_lists() {
        let filter = CatalogFilter::from_params(
            Some("pluck"),
            Some("1, 2,x,3"),
            Some("Serum,Vital"),
            Some("bass"),
        );
        assert_eq!(filter.term.as_deref(), Some("pluck"));
        assert_eq!(filter.genres, vec![1, 2, 3]);
        assert_eq!(filter.vst_names, vec!["Serum", "Vital"]);
        assert_eq!(filter.preset_types, vec!["bass"]);
    }

    #[test]
    fn present_dimensions_are_joined_with_and() {
        let filter = CatalogFilter::from_params(Some("foo"), Some("5"), None, Some("lead"));

        let mut qb = QueryBuilder::new("SELECT 1 FROM presets p");
        filter.apply(&mut qb);

        let sql = qb.sql();
        assert!(sql.contains(" WHERE "));
        assert!(sql.contains("lower(p.title) LIKE "));
        assert!(sql.contains("p.genre_id IN ("));
        assert!(sql.contains("p.preset_type IN ("));
        assert_eq!(sql.matches(" AND ").count(), 2);
    }

    #[test]
    fn single_dimension_has_no_and() {
        let filter = CatalogFilter::from_params(None, None, Some("Serum"), None);

        let mut qb = QueryBuilder::new("SELECT 1 FROM presets p");
        filter.apply(&mut qb);

        let sql = qb.sql();
        assert!(sql.contains("v.name IN ("));
        assert!(!sql.contains(" AND "));
    }
}

//! Browsing the entry list: Pokédex selection, search, sort and neighbours.

use crate::entry::{Entry, Identity};
use crate::slug::slugify;
use schema::Region;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which Pokédex the list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PokedexFilter {
    /// Standard entries only.
    #[default]
    National,
    /// Entries of one region only.
    Regional(Region),
}

impl PokedexFilter {
    /// Pokédex choices in selector order. White-striped forms have no Pokédex
    /// of their own.
    pub const ALL: [PokedexFilter; 5] = [
        PokedexFilter::National,
        PokedexFilter::Regional(Region::Alola),
        PokedexFilter::Regional(Region::Galar),
        PokedexFilter::Regional(Region::Hisui),
        PokedexFilter::Regional(Region::Paldea),
    ];

    pub fn label(self) -> String {
        match self {
            PokedexFilter::National => "Pokédex national".to_string(),
            PokedexFilter::Regional(region) => format!("Pokédex {}", region.label_fr()),
        }
    }

    pub fn region(self) -> Option<Region> {
        match self {
            PokedexFilter::National => None,
            PokedexFilter::Regional(region) => Some(region),
        }
    }

    pub fn accepts(self, entry: &Entry) -> bool {
        entry.region == self.region()
    }

    pub fn apply<'e>(self, entries: &'e [Entry]) -> Vec<&'e Entry> {
        entries.iter().filter(|e| self.accepts(e)).collect()
    }
}

impl fmt::Display for PokedexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokedexFilter::National => write!(f, "national"),
            PokedexFilter::Regional(region) => write!(f, "{}", region),
        }
    }
}

impl FromStr for PokedexFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("national") {
            Ok(PokedexFilter::National)
        } else {
            Region::from_str(s).map(PokedexFilter::Regional)
        }
    }
}

/// Entries whose French name contains `query` (ignoring case and accents) or
/// whose species id equals it. An empty query keeps everything.
pub fn search_entries<'e>(entries: &[&'e Entry], query: &str) -> Vec<&'e Entry> {
    let query = query.trim();
    if query.is_empty() {
        return entries.to_vec();
    }

    let needle = slugify(query);
    let id = query.parse::<u32>().ok();
    entries
        .iter()
        .copied()
        .filter(|entry| {
            id == Some(entry.species_id) || (!needle.is_empty() && entry.name_slug.contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortKey {
    #[default]
    Id,
    Name,
}

/// Stable sort by species id or by name slug.
pub fn sort_entries(entries: &mut [&Entry], key: SortKey) {
    match key {
        SortKey::Id => entries.sort_by_key(|e| e.species_id),
        SortKey::Name => entries.sort_by(|a, b| a.name_slug.cmp(&b.name_slug)),
    }
}

/// Position of the current entry within a browsed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbours<'e> {
    pub previous: Option<&'e Entry>,
    pub next: Option<&'e Entry>,
    pub is_first: bool,
    pub is_last: bool,
}

/// Previous and next entries around `current` in `list`.
///
/// The current identity is matched exactly first, then by species. When it is
/// absent from the list there are no neighbours and both ends are reported.
pub fn neighbours<'e>(list: &[&'e Entry], current: Identity) -> Neighbours<'e> {
    let index = list
        .iter()
        .position(|e| e.identity() == current)
        .or_else(|| list.iter().position(|e| e.species_id == current.species_id));

    match index {
        Some(index) => Neighbours {
            previous: index.checked_sub(1).and_then(|i| list.get(i)).copied(),
            next: list.get(index + 1).copied(),
            is_first: index == 0,
            is_last: index + 1 >= list.len(),
        },
        None => Neighbours {
            previous: None,
            next: None,
            is_first: true,
            is_last: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::common::fixture_entries;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(PokedexFilter::National, "Pokédex national")]
    #[case(PokedexFilter::Regional(Region::Alola), "Pokédex Alola")]
    #[case(PokedexFilter::Regional(Region::Hisui), "Pokédex Hisui")]
    fn test_filter_labels(#[case] filter: PokedexFilter, #[case] label: &str) {
        assert_eq!(filter.label(), label);
    }

    #[test]
    fn test_filter_parses_selector_values() {
        for filter in PokedexFilter::ALL {
            assert_eq!(filter.to_string().parse::<PokedexFilter>(), Ok(filter));
        }
        assert!("kanto".parse::<PokedexFilter>().is_err());
    }

    #[test]
    fn test_filters_split_standard_and_regional() {
        let entries = fixture_entries();

        let national = PokedexFilter::National.apply(&entries);
        assert!(national.iter().all(|e| e.region.is_none()));
        assert_eq!(national.len(), 16);

        let alola = PokedexFilter::Regional(Region::Alola).apply(&entries);
        let ids: Vec<u32> = alola.iter().map(|e| e.species_id).collect();
        assert_eq!(ids, vec![19, 20, 26, 52, 53]);
    }

    #[rstest]
    #[case("mime", vec![122, 439])]
    #[case("FLAGA", vec![80])]
    #[case("ténèbres", vec![])]
    #[case("863", vec![863])]
    #[case("", vec![19, 20, 25, 26, 52, 53, 79, 80, 122, 199, 215, 439, 461, 863, 866, 903])]
    fn test_search(#[case] query: &str, #[case] expected: Vec<u32>) {
        let entries = fixture_entries();
        let national = PokedexFilter::National.apply(&entries);
        let ids: Vec<u32> = search_entries(&national, query).iter().map(|e| e.species_id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_search_ignores_accents() {
        let entries = fixture_entries();
        let all: Vec<&Entry> = entries.iter().collect();
        let ids: Vec<u32> = search_entries(&all, "Glaquétte").iter().map(|e| e.species_id).collect();
        assert_eq!(ids, vec![866]);
    }

    #[test]
    fn test_sort_by_name() {
        let entries = fixture_entries();
        let mut national = PokedexFilter::National.apply(&entries);
        sort_entries(&mut national, SortKey::Name);
        let names: Vec<&str> = national.iter().take(4).map(|e| e.name()).collect();
        assert_eq!(names, vec!["Berserkatt", "Dimoret", "Farfuret", "Farfurex"]);

        sort_entries(&mut national, SortKey::Id);
        assert_eq!(national[0].species_id, 19);
    }

    #[test]
    fn test_neighbours() {
        let entries = fixture_entries();
        let alola = PokedexFilter::Regional(Region::Alola).apply(&entries);

        let first = neighbours(&alola, Identity::regional(19, Region::Alola));
        assert!(first.is_first);
        assert!(!first.is_last);
        assert_eq!(first.previous, None);
        assert_eq!(first.next.map(Entry::identity), Some(Identity::regional(20, Region::Alola)));

        let last = neighbours(&alola, Identity::regional(53, Region::Alola));
        assert!(last.is_last);
        assert_eq!(last.previous.map(|e| e.species_id), Some(52));

        let missing = neighbours(&alola, Identity::standard(25));
        assert!(missing.is_first && missing.is_last);
        assert_eq!(missing.next, None);
    }
}

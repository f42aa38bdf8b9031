#[cfg(test)]
mod tests {
    use crate::entry::Identity;
    use crate::resolver::tests::common::{entry, fixture_entries, reference};
    use crate::resolver::{MatchSource, Resolver};
    use crate::rules::{Direction, RuleTable};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::Region;

    #[rstest]
    #[case::same_region(Identity::regional(19, Region::Alola), Identity::regional(20, Region::Alola), MatchSource::SameRegion)]
    #[case::standard_to_standard(Identity::standard(19), Identity::standard(20), MatchSource::SameRegion)]
    #[case::falls_back_to_standard(Identity::regional(52, Region::Galar), Identity::standard(53), MatchSource::Standard)]
    fn test_default_region_preference(
        #[case] current: Identity,
        #[case] expected: Identity,
        #[case] source: MatchSource,
    ) {
        let table = RuleTable::default();
        let entries = fixture_entries();
        let next_id = expected.species_id;
        let next_name = if next_id == 20 { "Rattatac" } else { "Persian" };

        let result = Resolver::new(&table).resolve(
            current,
            &[reference(next_id, next_name)],
            Direction::Next,
            &entries,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identity(), expected);
        assert_eq!(result[0].source, source);
    }

    #[test]
    fn test_first_variant_when_no_standard_entry() {
        let table = RuleTable::default();
        let entries = vec![
            entry(10, "Chenipan", None),
            entry(11, "Chrysacier de Paldea", Some(Region::Paldea)),
            entry(11, "Chrysacier d'Hisui", Some(Region::Hisui)),
        ];

        let result = Resolver::new(&table).resolve(
            Identity::standard(10),
            &[reference(11, "Chrysacier")],
            Direction::Next,
            &entries,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identity(), Identity::regional(11, Region::Paldea));
        assert_eq!(result[0].source, MatchSource::FirstVariant);
    }

    #[test]
    fn test_reference_condition_is_attached() {
        let table = RuleTable::default();
        let entries = fixture_entries();

        let result = Resolver::new(&table).resolve(
            Identity::standard(52),
            &[reference(53, "Persian").with_condition("Niveau 28")],
            Direction::Next,
            &entries,
        );
        assert_eq!(result[0].condition.as_deref(), Some("Niveau 28"));
    }

    #[test]
    fn test_unknown_reference_emits_nothing() {
        let table = RuleTable::default();
        let entries = fixture_entries();

        let result = Resolver::new(&table).resolve(
            Identity::standard(25),
            &[reference(9999, "Inconnu"), reference(26, "Raichu")],
            Direction::Next,
            &entries,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identity(), Identity::standard(26));
    }

    #[test]
    fn test_missing_current_entry_still_matches_by_default() {
        let table = RuleTable::default();
        let entries = fixture_entries();

        // #172 (Pichu) is not part of the fixture list.
        let result = Resolver::new(&table).resolve(
            Identity::standard(172),
            &[reference(25, "Pikachu")],
            Direction::Next,
            &entries,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identity(), Identity::standard(25));
    }

    #[test]
    fn test_empty_references_give_empty_output() {
        let table = RuleTable::default();
        let entries = fixture_entries();

        let result = Resolver::new(&table).resolve(Identity::standard(25), &[], Direction::Pre, &entries);
        assert!(result.is_empty());
    }

    #[test]
    fn test_output_preserves_reference_order_and_drops_duplicates() {
        let table = RuleTable::default();
        let entries = fixture_entries();

        let result = Resolver::new(&table).resolve(
            Identity::standard(215),
            &[
                reference(903, "Farfurex"),
                reference(461, "Dimoret"),
                reference(903, "Farfurex"),
            ],
            Direction::Next,
            &entries,
        );

        let ids: Vec<u32> = result.iter().map(|e| e.entry.species_id).collect();
        assert_eq!(ids, vec![903, 461]);
    }
}

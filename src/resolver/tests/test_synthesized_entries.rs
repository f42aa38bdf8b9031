#[cfg(test)]
mod tests {
    use crate::entry::{regional_sprites, Identity};
    use crate::resolver::tests::common::{entry, fixture_entries, reference, rule_table};
    use crate::resolver::{MatchSource, Resolver};
    use crate::rules::Direction;
    use pretty_assertions::assert_eq;
    use schema::Region;

    const PIKACHU_ALOLA: &str = r#"(
        normal_to_regional: [
            (from: "Pikachu", to: "Raichu", to_region: Some(Alola), condition: Some("Pierre Foudre")),
        ],
    )"#;

    fn entries_without_alolan_raichu() -> Vec<crate::entry::Entry> {
        fixture_entries()
            .into_iter()
            .filter(|e| e.identity() != Identity::regional(26, Region::Alola))
            .collect()
    }

    #[test]
    fn test_missing_rule_target_is_synthesized() {
        let table = rule_table(PIKACHU_ALOLA);
        let entries = entries_without_alolan_raichu();

        let result = Resolver::new(&table).resolve(
            Identity::standard(25),
            &[reference(26, "Raichu")],
            Direction::Next,
            &entries,
        );

        assert_eq!(result.len(), 1);
        let raichu = &result[0];
        assert!(raichu.is_synthesized());
        assert_eq!(raichu.source, MatchSource::Synthesized);
        assert_eq!(raichu.identity(), Identity::regional(26, Region::Alola));
        assert_eq!(raichu.entry.name(), "Raichu d'Alola");
        assert_eq!(raichu.entry.base_slug, "raichu");
        assert_eq!(raichu.entry.sprites, regional_sprites(26, Region::Alola));
        assert_eq!(raichu.entry.types, vec!["Électrik".to_string()]);
        assert_eq!(raichu.condition.as_deref(), Some("Pierre Foudre"));
    }

    #[test]
    fn test_synthesized_entries_come_after_natural_ones() {
        let table = rule_table(PIKACHU_ALOLA);
        let entries = entries_without_alolan_raichu();

        let result = Resolver::new(&table).resolve(
            Identity::standard(25),
            &[reference(26, "Raichu"), reference(20, "Rattatac")],
            Direction::Next,
            &entries,
        );

        let sources: Vec<(Identity, MatchSource)> =
            result.iter().map(|e| (e.identity(), e.source)).collect();
        assert_eq!(
            sources,
            vec![
                (Identity::standard(20), MatchSource::SameRegion),
                (Identity::regional(26, Region::Alola), MatchSource::Synthesized),
            ]
        );
    }

    #[test]
    fn test_rule_name_with_suffix_is_kept() {
        let table = rule_table(
            r#"(
                normal_to_regional: [
                    (from: "Goupix", to: "Feunard d'Alola", to_region: Some(Alola)),
                ],
            )"#,
        );
        let entries = vec![entry(37, "Goupix", None), entry(38, "Feunard", None)];

        let result = Resolver::new(&table).resolve(
            Identity::standard(37),
            &[reference(38, "Feunard")],
            Direction::Next,
            &entries,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].entry.name(), "Feunard d'Alola");
        assert_eq!(result[0].entry.name_slug, "feunarddalola");
    }
}

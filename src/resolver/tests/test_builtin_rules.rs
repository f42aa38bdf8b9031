#[cfg(test)]
mod tests {
    use crate::entry::Identity;
    use crate::resolver::tests::common::{fixture_entries, identities, reference};
    use crate::resolver::{resolve, MatchSource, Resolver};
    use crate::rules::{Direction, RuleTable};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{RawEvolutionRef, Region, RuleClass};

    fn miaouss_next() -> Vec<RawEvolutionRef> {
        vec![reference(53, "Persian"), reference(863, "Berserkatt")]
    }

    #[rstest]
    #[case::standard(Identity::standard(52), vec![Identity::standard(53)])]
    #[case::alola(Identity::regional(52, Region::Alola), vec![Identity::regional(53, Region::Alola)])]
    #[case::galar(Identity::regional(52, Region::Galar), vec![Identity::standard(863)])]
    fn test_miaouss_branches(#[case] current: Identity, #[case] expected: Vec<Identity>) {
        let entries = fixture_entries();
        let result = resolve(current, &miaouss_next(), Direction::Next, &entries).unwrap();
        assert_eq!(identities(&result), expected);
    }

    #[rstest]
    #[case::standard(Identity::standard(79), vec![])]
    #[case::galar(
        Identity::regional(79, Region::Galar),
        vec![Identity::regional(80, Region::Galar), Identity::regional(199, Region::Galar)]
    )]
    fn test_ramoloss_branches(#[case] current: Identity, #[case] expected: Vec<Identity>) {
        let entries = fixture_entries();
        let refs = [reference(80, "Flagadoss"), reference(199, "Roigada")];
        let result = resolve(current, &refs, Direction::Next, &entries).unwrap();
        assert_eq!(identities(&result), expected);
    }

    #[test]
    fn test_mime_family_in_both_directions() {
        let entries = fixture_entries();
        let resolver = Resolver::builtin().unwrap();

        let next = resolver.resolve(
            Identity::regional(122, Region::Galar),
            &[reference(866, "M. Glaquette")],
            Direction::Next,
            &entries,
        );
        assert_eq!(identities(&next), vec![Identity::standard(866)]);

        let pre = resolver.resolve(
            Identity::standard(866),
            &[reference(122, "M. Mime")],
            Direction::Pre,
            &entries,
        );
        assert_eq!(identities(&pre), vec![Identity::regional(122, Region::Galar)]);

        let pre = resolver.resolve(
            Identity::regional(122, Region::Galar),
            &[reference(439, "Mime Jr.")],
            Direction::Pre,
            &entries,
        );
        assert_eq!(identities(&pre), vec![Identity::standard(439)]);

        let next = resolver.resolve(
            Identity::standard(122),
            &[reference(866, "M. Glaquette")],
            Direction::Next,
            &entries,
        );
        assert!(next.is_empty());
    }

    #[rstest]
    #[case::standard(Identity::standard(215), vec![Identity::standard(461)])]
    #[case::hisui(Identity::regional(215, Region::Hisui), vec![Identity::standard(903)])]
    fn test_farfuret_branches(#[case] current: Identity, #[case] expected: Vec<Identity>) {
        let entries = fixture_entries();
        let refs = [reference(461, "Dimoret"), reference(903, "Farfurex")];
        let result = resolve(current, &refs, Direction::Next, &entries).unwrap();
        assert_eq!(identities(&result), expected);
    }

    #[test]
    fn test_pikachu_evolves_into_alolan_raichu() {
        let entries = fixture_entries();
        let result = resolve(
            Identity::standard(25),
            &[reference(26, "Raichu")],
            Direction::Next,
            &entries,
        )
        .unwrap();
        assert_eq!(identities(&result), vec![Identity::regional(26, Region::Alola)]);
        assert_eq!(result[0].source, MatchSource::RuleOverride);

        let pre = resolve(
            Identity::regional(26, Region::Alola),
            &[reference(25, "Pikachu")],
            Direction::Pre,
            &entries,
        )
        .unwrap();
        assert_eq!(identities(&pre), vec![Identity::standard(25)]);
    }

    #[test]
    fn test_builtin_splits_have_no_standard_twin() {
        let table = RuleTable::builtin().unwrap();
        for (from, to) in [("Pikachu", "Raichu"), ("Ramoloss", "Flagadoss"), ("Ramoloss", "Roigada")] {
            if let Some(rule) = table.find_forward_rule(from, None, to) {
                assert_ne!(rule.class, RuleClass::NormalToNormal, "{} -> {}", from, to);
            }
        }
    }
}

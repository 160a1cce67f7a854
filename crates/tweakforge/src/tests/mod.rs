
use crate::bundle::Bundle;
use crate::decode::{DecodedSlot, decode_command};
use crate::mapping::ConfigurationMapping;

pub(crate) const BULK_FRAGMENTS: usize = 12;

pub(crate) fn mapping() -> ConfigurationMapping {
    let bulk: Vec<String> = (1..=BULK_FRAGMENTS)
        .map(|n| format!("\"~big.lua{{N={n}}}\""))
        .collect();

    ConfigurationMapping::from_json_str(format!(
        r#"{{
            "base": {{ "commands": ["!base"], "tweakdefs": ["~base.lua"] }},
            "settings": {{
                "mult": {{
                    "default": 1,
                    "values": {{
                        "2": {{
                            "commands": ["!mult 2"],
                            "tweakdefs": ["~scale.lua{{M=2}}"],
                            "tweakunits": ["~units.lua{{BP=600}}"]
                        }}
                    }}
                }},
                "broken": {{
                    "default": false,
                    "values": {{
                        "true": {{ "tweakdefs": ["~missing.lua", "not-a-ref", "~scale.lua{{M=3,UNUSED=1}}"] }}
                    }}
                }},
                "bulk": {{
                    "default": 0,
                    "values": {{
                        "1": {{ "commands": ["!bulk"], "tweakdefs": [{}] }}
                    }}
                }}
            }}
        }}"#,
        bulk.join(", ")
    ))
    .unwrap()
}

pub(crate) fn bundle() -> Bundle {
    [
        ("base.lua", "-- base rules\nlocal enabled = true".to_string()),
        ("scale.lua", "local m = $M$\nlocal half = ($M$ / 2)".to_string()),
        ("units.lua", "{ armcom = { workertime = $BP$ } }".to_string()),
        ("big.lua", format!("local n = $N$\n{}", "x = 1\n".repeat(200))),
    ]
    .into_iter()
    .collect()
}

pub(crate) fn decode_all(commands: &[String]) -> Vec<DecodedSlot> {
    commands
        .iter()
        .filter_map(|c| decode_command(c).unwrap())
        .collect()
}

#[cfg(test)]
mod test {
    use crate::category::Category;
    use crate::configuration::Configuration;
    use crate::sections::LobbyBuilder;
    use crate::tests::{bundle, decode_all, mapping};
    use pretty_assertions::assert_eq;
    use tweakforge_util::diagnostics::{Diagnostics, Warning};

    #[test_log::test]
    fn defaults_only_emit_base() {
        let m = mapping();
        let mut d = Diagnostics::new();
        let build = LobbyBuilder::new(&m)
            .build(&m.defaults(), &bundle(), &mut d)
            .unwrap();

        assert_eq!(build.commands.len(), 2);
        assert_eq!(build.commands[0], "!base");
        assert_eq!(build.sections, vec![build.commands.join("\n")]);
        assert!(d.is_empty());
    }

    #[test_log::test]
    fn literal_then_tweakdefs_then_tweakunits() {
        let m = mapping();
        let mut d = Diagnostics::new();
        let config = Configuration::new().with("mult", 2_i64);
        let build = LobbyBuilder::new(&m).build(&config, &bundle(), &mut d).unwrap();

        assert_eq!(&build.commands[..2], &["!base", "!mult 2"]);
        assert!(build.commands[2].starts_with("!bset tweakdefs "));
        assert!(build.commands[3].starts_with("!bset tweakunits "));
        assert_eq!(build.commands.len(), 4);

        let slots = decode_all(&build.commands);
        assert_eq!(slots[0].category, Category::TweakDefs);
        assert_eq!(
            slots[0].payload,
            "-- Source: ~base.lua\n-- base rules\nlocal enabled = true\n\
             -- Source: ~scale.lua{M=2}\nlocal m = 2\nlocal half = (1)"
        );
        assert_eq!(
            slots[1].payload,
            "-- Source: ~units.lua{BP=600}\n{ armcom = { workertime = 600 } }"
        );
        assert!(d.is_empty());
    }

    #[test_log::test]
    fn bad_references_are_skipped_and_reported() {
        let m = mapping();
        let mut d = Diagnostics::new();
        let config = Configuration::new().with("broken", true);
        let build = LobbyBuilder::new(&m).build(&config, &bundle(), &mut d).unwrap();

        let slots = decode_all(&build.commands);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].sources(), vec!["~base.lua", "~scale.lua{M=3,UNUSED=1}"]);
        assert!(slots[0].payload.ends_with("local m = 3\nlocal half = (1.5)"));

        assert_eq!(
            d.warnings(),
            &[
                Warning::MissingSource {
                    token: "~missing.lua".into(),
                    path: "missing.lua".into(),
                },
                Warning::InvalidReference {
                    token: "not-a-ref".into(),
                    reason: "missing '~' prefix",
                },
                Warning::UnusedVariable {
                    name: "UNUSED".into()
                },
            ]
        );
    }

    #[test]
    fn deterministic() {
        let m = mapping();
        let config = Configuration::new()
            .with("mult", 2_i64)
            .with("broken", true)
            .with("bulk", 1_i64);

        let first = LobbyBuilder::new(&m)
            .build(&config, &bundle(), &mut Diagnostics::new())
            .unwrap();
        let second = LobbyBuilder::new(&m)
            .build(&config, &bundle(), &mut Diagnostics::new())
            .unwrap();

        assert_eq!(first, second);
    }
}

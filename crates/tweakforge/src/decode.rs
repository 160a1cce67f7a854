use crate::annotate::source_reference;
use crate::category::Category;
use crate::errors::TweakResult;
use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use regex::Regex;
use std::sync::LazyLock;

static SLOT_COMMAND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!bset (?P<category>tweakdefs|tweakunits)(?P<slot>[1-9][0-9]*)? (?P<payload>[A-Za-z0-9_-]*)$")
        .unwrap()
});

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DecodedSlot {
    pub category: Category,
    pub slot: usize,
    pub payload: String,
}

impl DecodedSlot {
    /// Reference tokens recorded in this slot's source comments.
    pub fn sources(&self) -> Vec<String> {
        extract_sources(self.category, &self.payload)
    }
}

/// Decode a packed slot command. Literal commands (anything that is not a `tweakdefs` or
/// `tweakunits` slot) yield `Ok(None)`; a slot command with a corrupt payload is an error.
pub fn decode_command<S: AsRef<str>>(line: S) -> TweakResult<Option<DecodedSlot>> {
    let line = line.as_ref().trim_end();
    let Some(caps) = SLOT_COMMAND_REGEX.captures(line) else {
        return Ok(None);
    };

    let Some(category) = Category::from_name(&caps["category"]) else {
        return Ok(None);
    };

    let slot = match caps.name("slot") {
        Some(slot) => slot.as_str().parse()?,
        None => 0,
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(&caps["payload"])
        .with_context(|| format!("invalid payload in {category} slot {slot}"))?;
    let payload = String::from_utf8(bytes)
        .with_context(|| format!("{category} slot {slot} is not UTF-8"))?;

    Ok(Some(DecodedSlot {
        category,
        slot,
        payload,
    }))
}

/// Every reference token named on a source comment line of `payload`, in order.
pub fn extract_sources<S: AsRef<str>>(category: Category, payload: S) -> Vec<String> {
    payload
        .as_ref()
        .split(category.line_terminator())
        .filter_map(|line| source_reference(category, line))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use crate::category::Category;
    use crate::decode::{DecodedSlot, decode_command, extract_sources};
    use crate::pack::slot_command;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_slot_commands() {
        let payload = "-- Source: ~a.lua\nlocal a = 1\n-- Source: ~b.lua{X=2}\nlocal b = 2";
        let command = slot_command(Category::TweakUnits, 3, payload);

        let decoded = decode_command(&command).unwrap().unwrap();
        assert_eq!(
            decoded,
            DecodedSlot {
                category: Category::TweakUnits,
                slot: 3,
                payload: payload.to_string(),
            }
        );
        assert_eq!(decoded.sources(), vec!["~a.lua", "~b.lua{X=2}"]);
    }

    #[test]
    fn slot_zero_has_no_suffix() {
        let command = slot_command(Category::TweakDefs, 0, "x");
        assert_eq!(decode_command(command).unwrap().unwrap().slot, 0);
    }

    #[test]
    fn literal_commands_are_skipped() {
        assert_eq!(decode_command("!bset startmetal 2000").unwrap(), None);
        assert_eq!(decode_command("!preset team").unwrap(), None);
    }

    #[test]
    fn corrupt_payload() {
        assert!(decode_command("!bset tweakdefs A").is_err());
    }

    #[test]
    fn sources_need_the_marker() {
        let payload = "-- just a comment\n--Source: ~tight.lua\n-- Source: ~b.lua";
        assert_eq!(
            extract_sources(Category::TweakDefs, payload),
            vec!["~tight.lua", "~b.lua"]
        );
    }
}

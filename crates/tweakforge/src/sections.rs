use crate::annotate::AnnotatedFragment;
use crate::category::Category;
use crate::configuration::Configuration;
use crate::errors::PackError;
use crate::limits::PackLimits;
use crate::mapping::ConfigurationMapping;
use crate::pack::pack;
use tweakforge_template::resolve::{SourceLookup, resolve_reference};
use tweakforge_util::diagnostics::{DiagnosticSink, Warning};

/// Output of a build: every command in emission order, and the same commands grouped into
/// sections for chunked transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyBuild {
    pub commands: Vec<String>,
    pub sections: Vec<String>,
}

/// Runs the whole pipeline against one mapping and set of limits.
#[derive(Debug, Clone, Copy)]
pub struct LobbyBuilder<'m> {
    mapping: &'m ConfigurationMapping,
    limits: PackLimits,
}

impl<'m> LobbyBuilder<'m> {
    pub fn new(mapping: &'m ConfigurationMapping) -> Self {
        LobbyBuilder {
            mapping,
            limits: PackLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PackLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(
        &self,
        configuration: &Configuration,
        bundle: &impl SourceLookup,
        diag: &mut impl DiagnosticSink,
    ) -> Result<LobbyBuild, PackError> {
        let plan = self.mapping.map_to_tweaks(configuration);
        let mut commands = plan.commands.clone();

        for category in Category::ALL {
            let fragments: Vec<AnnotatedFragment> = plan
                .references(category)
                .iter()
                .filter_map(|token| {
                    let source = resolve_reference(token, bundle, diag)?;
                    Some(AnnotatedFragment::new(category, token.as_str(), source))
                })
                .collect();

            commands.extend(pack(category, &fragments, &self.limits)?);
        }

        let sections = group_sections(commands.as_slice(), self.limits.max_command_length, diag);
        Ok(LobbyBuild { commands, sections })
    }
}

/// Build sections for `configuration` using the built-in mapping and default limits.
pub fn build_lobby_sections(
    configuration: &Configuration,
    bundle: &impl SourceLookup,
    diag: &mut impl DiagnosticSink,
) -> Result<LobbyBuild, PackError> {
    LobbyBuilder::new(ConfigurationMapping::builtin()).build(configuration, bundle, diag)
}

/// Join consecutive commands with newlines while the joined length stays within `limit`. A
/// command that is too long by itself is emitted as its own section.
pub fn group_sections<S: AsRef<str>>(
    commands: &[S],
    limit: usize,
    diag: &mut impl DiagnosticSink,
) -> Vec<String> {
    let mut sections = vec![];
    // Open section and its length in characters. An empty command still opens a section.
    let mut current: Option<(String, usize)> = None;

    for command in commands {
        let command = command.as_ref();
        let len = command.chars().count();

        if len > limit {
            diag.warn(Warning::OversizedCommand { length: len, limit });
            sections.extend(current.take().map(|(section, _)| section));
            sections.push(command.to_string());
            continue;
        }

        current = match current.take() {
            Some((mut section, section_len)) if section_len + 1 + len <= limit => {
                section.push('\n');
                section.push_str(command);
                Some((section, section_len + 1 + len))
            }
            Some((section, _)) => {
                sections.push(section);
                Some((command.to_string(), len))
            }
            None => Some((command.to_string(), len)),
        };
    }

    sections.extend(current.map(|(section, _)| section));

    sections
}

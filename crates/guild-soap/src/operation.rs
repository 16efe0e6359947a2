use std::borrow::Cow;

use guild_xml::builder::is_xml_char;

use crate::GuildError;

/// A request to the guild service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListGuilds,
    GetGuildById {
        guild_id: i64,
    },
    CreateGuild {
        name: String,
        description: String,
        leader: String,
    },
    JoinGuild {
        guild_id: i64,
        character_name: String,
    },
    GetGuildMembers {
        guild_id: i64,
    },
}

impl Operation {
    /// The wire name of the operation, used as the body tag and SOAPAction suffix.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListGuilds => "get_all_guilds",
            Self::GetGuildById { .. } => "get_guild_by_id",
            Self::CreateGuild { .. } => "create_guild",
            Self::JoinGuild { .. } => "join_guild",
            Self::GetGuildMembers { .. } => "get_guild_members",
        }
    }

    /// Structural checks that must pass before anything goes on the wire.
    pub fn validate(&self) -> Result<(), GuildError> {
        match self {
            Self::ListGuilds => Ok(()),
            Self::GetGuildById { guild_id } | Self::GetGuildMembers { guild_id } => {
                validate_guild_id(*guild_id)
            }
            Self::CreateGuild {
                name,
                description,
                leader,
            } => {
                require_text("name", name)?;
                require_xml_text("description", description)?;
                require_text("leader", leader)
            }
            Self::JoinGuild {
                guild_id,
                character_name,
            } => {
                validate_guild_id(*guild_id)?;
                require_text("character_name", character_name)
            }
        }
    }

    /// Argument tags and their text, in the order the service binds them.
    pub fn arguments(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        match self {
            Self::ListGuilds => Vec::new(),
            Self::GetGuildById { guild_id } | Self::GetGuildMembers { guild_id } => {
                vec![("guild_id", Cow::Owned(guild_id.to_string()))]
            }
            Self::CreateGuild {
                name,
                description,
                leader,
            } => vec![
                ("name", Cow::Borrowed(name.as_str())),
                ("description", Cow::Borrowed(description.as_str())),
                ("leader", Cow::Borrowed(leader.as_str())),
            ],
            Self::JoinGuild {
                guild_id,
                character_name,
            } => vec![
                ("guild_id", Cow::Owned(guild_id.to_string())),
                ("character_name", Cow::Borrowed(character_name.as_str())),
            ],
        }
    }
}

// The service declares guild ids as xsd:int.
fn validate_guild_id(guild_id: i64) -> Result<(), GuildError> {
    if (0..=i64::from(i32::MAX)).contains(&guild_id) {
        Ok(())
    } else {
        Err(GuildError::InvalidArgument(Cow::Owned(format!(
            "guild_id must be a non-negative 32-bit integer, got {guild_id}"
        ))))
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), GuildError> {
    if value.trim().is_empty() {
        return Err(GuildError::InvalidArgument(Cow::Owned(format!(
            "{field} must not be empty"
        ))));
    }
    require_xml_text(field, value)
}

fn require_xml_text(field: &'static str, value: &str) -> Result<(), GuildError> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(GuildError::InvalidArgument(Cow::Owned(format!(
            "{field} contains U+{:04X}, which XML cannot carry",
            u32::from(c)
        )))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, description: &str, leader: &str) -> Operation {
        Operation::CreateGuild {
            name: name.to_string(),
            description: description.to_string(),
            leader: leader.to_string(),
        }
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Operation::ListGuilds.name(), "get_all_guilds");
        assert_eq!(Operation::GetGuildById { guild_id: 1 }.name(), "get_guild_by_id");
        assert_eq!(create("a", "b", "c").name(), "create_guild");
        assert_eq!(
            Operation::JoinGuild {
                guild_id: 1,
                character_name: "Sif".into()
            }
            .name(),
            "join_guild"
        );
        assert_eq!(
            Operation::GetGuildMembers { guild_id: 1 }.name(),
            "get_guild_members"
        );
    }

    #[test]
    fn test_create_guild_argument_order() {
        let operation = create("Dragon Slayers", "Hunters of ancient dragons", "Ornstein");
        let arguments = operation.arguments();
        let tags: Vec<&str> = arguments.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, ["name", "description", "leader"]);
        assert_eq!(arguments[0].1, "Dragon Slayers");
        assert_eq!(arguments[2].1, "Ornstein");
    }

    #[test]
    fn test_join_guild_argument_order() {
        let operation = Operation::JoinGuild {
            guild_id: 7,
            character_name: "Solaire".into(),
        };
        let arguments = operation.arguments();
        assert_eq!(arguments[0], ("guild_id", Cow::Borrowed("7")));
        assert_eq!(arguments[1], ("character_name", Cow::Borrowed("Solaire")));
    }

    #[test]
    fn test_guild_id_is_plain_decimal() {
        let operation = Operation::GetGuildById { guild_id: 0 };
        assert_eq!(operation.arguments()[0].1, "0");

        let operation = Operation::GetGuildMembers { guild_id: 2_147_483_647 };
        assert_eq!(operation.arguments()[0].1, "2147483647");
    }

    #[test]
    fn test_list_guilds_has_no_arguments() {
        assert!(Operation::ListGuilds.arguments().is_empty());
        assert!(Operation::ListGuilds.validate().is_ok());
    }

    #[test]
    fn test_negative_guild_id_is_rejected() {
        for operation in [
            Operation::GetGuildById { guild_id: -1 },
            Operation::GetGuildMembers { guild_id: -1 },
            Operation::JoinGuild {
                guild_id: -1,
                character_name: "Sif".into(),
            },
        ] {
            let err = operation.validate().unwrap_err();
            assert!(matches!(err, GuildError::InvalidArgument(_)), "{operation:?}");
        }
    }

    #[test]
    fn test_guild_id_beyond_int_range_is_rejected() {
        let operation = Operation::GetGuildById {
            guild_id: i64::from(i32::MAX) + 1,
        };
        assert!(matches!(
            operation.validate(),
            Err(GuildError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_blank_text_is_rejected() {
        assert!(create("", "desc", "Gwyn").validate().is_err());
        assert!(create("   ", "desc", "Gwyn").validate().is_err());
        assert!(create("Lords", "desc", "").validate().is_err());
        assert!(
            Operation::JoinGuild {
                guild_id: 1,
                character_name: " \t".into()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_xml_illegal_characters_are_rejected() {
        for operation in [
            create("a\u{1}b", "desc", "Gwyn"),
            create("Lords", "bell\u{7}", "Gwyn"),
            create("Lords", "desc", "Gwyn\u{FFFE}"),
            Operation::JoinGuild {
                guild_id: 1,
                character_name: "Sif\u{0}".into(),
            },
        ] {
            let err = operation.validate().unwrap_err();
            assert!(
                matches!(err, GuildError::InvalidArgument(ref detail) if detail.contains("U+")),
                "{operation:?}"
            );
        }
    }

    #[test]
    fn test_line_breaks_and_tabs_are_allowed() {
        assert!(create("Lords\tof Cinder", "one\r\ntwo\rthree", "Gwyn").validate().is_ok());
    }

    #[test]
    fn test_empty_description_is_allowed() {
        assert!(create("Lords", "", "Gwyn").validate().is_ok());
    }
}

//! Conversions from Serenity interaction data into router types.

use crate::{CommandInvocation, CommandOption, OptionValue};
use serenity::model::application::{CommandData, CommandDataOption, CommandDataOptionValue};

impl From<&CommandDataOption> for CommandOption {
    fn from(option: &CommandDataOption) -> Self {
        CommandOption::new(option.name.clone(), OptionValue::from(&option.value))
    }
}

impl From<&CommandDataOptionValue> for OptionValue {
    fn from(value: &CommandDataOptionValue) -> Self {
        use CommandDataOptionValue as V;

        match value {
            V::String(v) => OptionValue::String(v.clone()),
            V::Integer(v) => OptionValue::Integer(*v),
            V::Boolean(v) => OptionValue::Boolean(*v),
            V::Number(v) => OptionValue::Number(*v),
            V::SubCommand(options) => {
                OptionValue::SubCommand(options.iter().map(CommandOption::from).collect())
            }
            V::SubCommandGroup(options) => {
                OptionValue::SubCommandGroup(options.iter().map(CommandOption::from).collect())
            }
            V::User(id) => OptionValue::User(id.to_string()),
            V::Channel(id) => OptionValue::Channel(id.to_string()),
            V::Role(id) => OptionValue::Role(id.to_string()),
            V::Mentionable(id) => OptionValue::Mentionable(id.to_string()),
            V::Attachment(id) => OptionValue::Attachment(id.to_string()),
            V::Autocomplete { value, .. } => OptionValue::String(value.clone()),
            V::Unknown(code) => OptionValue::Unknown(*code),
            other => {
                tracing::warn!(?other, "Unrecognized command option value");
                OptionValue::Unknown(u8::MAX)
            }
        }
    }
}

impl From<&CommandData> for CommandInvocation {
    fn from(data: &CommandData) -> Self {
        CommandInvocation::new(
            data.name.clone(),
            data.options.iter().map(CommandOption::from).collect(),
        )
    }
}

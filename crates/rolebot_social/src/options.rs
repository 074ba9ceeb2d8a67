//! Typed decoding of slash command option trees.
//!
//! A command's options arrive as a tree of named, typed values. Handlers
//! declare the record they want through [`CommandOptions::schema`] and
//! [`decode_options`] projects the tree onto it, collecting every problem
//! instead of stopping at the first.
//!
//! Two things are reported:
//! - an option whose type does not match the field it is bound to
//! - an option no field is bound to (the command definition has drifted
//!   ahead of the code)
//!
//! Options that are absent leave their field at its default. Whether an
//! option is required is decided by the command definition, never here.

use std::collections::HashMap;
use std::fmt;

/// One node of an option tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    /// Option name as declared in the command definition
    pub name: String,
    /// Typed value
    pub value: OptionValue,
}

impl CommandOption {
    /// Create an option node.
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// A string option.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, OptionValue::String(value.into()))
    }

    /// An integer option.
    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, OptionValue::Integer(value))
    }

    /// A boolean option.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, OptionValue::Boolean(value))
    }

    /// A floating point option.
    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, OptionValue::Number(value))
    }

    /// A selected sub-command and its options.
    pub fn sub_command(name: impl Into<String>, options: Vec<CommandOption>) -> Self {
        Self::new(name, OptionValue::SubCommand(options))
    }

    /// A selected sub-command group and its selected sub-command.
    pub fn sub_command_group(name: impl Into<String>, options: Vec<CommandOption>) -> Self {
        Self::new(name, OptionValue::SubCommandGroup(options))
    }

    /// Children of a sub-command or sub-command group node.
    pub fn children(&self) -> Option<&[CommandOption]> {
        match &self.value {
            OptionValue::SubCommand(options) | OptionValue::SubCommandGroup(options) => {
                Some(options)
            }
            _ => None,
        }
    }
}

/// Value carried by an option node.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Text
    String(String),
    /// Whole number
    Integer(i64),
    /// Flag
    Boolean(bool),
    /// Floating point number
    Number(f64),
    /// Selected sub-command
    SubCommand(Vec<CommandOption>),
    /// Selected sub-command group
    SubCommandGroup(Vec<CommandOption>),
    /// User snowflake
    User(String),
    /// Channel snowflake
    Channel(String),
    /// Role snowflake
    Role(String),
    /// User or role snowflake
    Mentionable(String),
    /// Attachment snowflake
    Attachment(String),
    /// A type this build does not recognize, by its wire code
    Unknown(u8),
}

impl OptionValue {
    /// The type category of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::String(_) => OptionKind::String,
            Self::Integer(_) => OptionKind::Integer,
            Self::Boolean(_) => OptionKind::Boolean,
            Self::Number(_) => OptionKind::Number,
            Self::SubCommand(_) => OptionKind::SubCommand,
            Self::SubCommandGroup(_) => OptionKind::SubCommandGroup,
            Self::User(_) => OptionKind::User,
            Self::Channel(_) => OptionKind::Channel,
            Self::Role(_) => OptionKind::Role,
            Self::Mentionable(_) => OptionKind::Mentionable,
            Self::Attachment(_) => OptionKind::Attachment,
            Self::Unknown(_) => OptionKind::Unknown,
        }
    }
}

/// Option type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum OptionKind {
    /// Text
    #[display("string")]
    String,
    /// Whole number
    #[display("integer")]
    Integer,
    /// Flag
    #[display("boolean")]
    Boolean,
    /// Floating point number
    #[display("number")]
    Number,
    /// Sub-command node
    #[display("sub-command")]
    SubCommand,
    /// Sub-command group node
    #[display("sub-command group")]
    SubCommandGroup,
    /// User reference
    #[display("user")]
    User,
    /// Channel reference
    #[display("channel")]
    Channel,
    /// Role reference
    #[display("role")]
    Role,
    /// User or role reference
    #[display("mentionable")]
    Mentionable,
    /// Attachment reference
    #[display("attachment")]
    Attachment,
    /// Unrecognized type
    #[display("unknown")]
    Unknown,
}

impl OptionKind {
    /// Whether a record field can hold a value of this kind.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Integer | Self::Boolean | Self::Number
        )
    }
}

/// Typed assignment into a field of `T`.
pub enum FieldSetter<T> {
    /// Text field
    String(fn(&mut T, String)),
    /// Whole number field
    Integer(fn(&mut T, i64)),
    /// Flag field
    Boolean(fn(&mut T, bool)),
    /// Floating point field
    Number(fn(&mut T, f64)),
}

impl<T> FieldSetter<T> {
    fn kind(&self) -> OptionKind {
        match self {
            Self::String(_) => OptionKind::String,
            Self::Integer(_) => OptionKind::Integer,
            Self::Boolean(_) => OptionKind::Boolean,
            Self::Number(_) => OptionKind::Number,
        }
    }

    /// Assign the value if its kind matches; returns whether it did.
    fn apply(&self, target: &mut T, value: &OptionValue) -> bool {
        match (self, value) {
            (Self::String(set), OptionValue::String(v)) => set(target, v.clone()),
            (Self::Integer(set), OptionValue::Integer(v)) => set(target, *v),
            (Self::Boolean(set), OptionValue::Boolean(v)) => set(target, *v),
            (Self::Number(set), OptionValue::Number(v)) => set(target, *v),
            _ => return false,
        }
        true
    }
}

/// A record field and the option it reads from.
pub struct FieldBinding<T> {
    field: &'static str,
    option: &'static str,
    setter: FieldSetter<T>,
}

impl<T> FieldBinding<T> {
    /// Field name.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Name of the option bound to the field.
    pub fn option(&self) -> &'static str {
        self.option
    }

    /// Expected option kind.
    pub fn kind(&self) -> OptionKind {
        self.setter.kind()
    }
}

/// Ordered field bindings for a record type.
///
/// Fields bind to the option of the same name unless [`bind`](Self::bind)
/// renames the most recently added field.
///
/// # Example
///
/// ```
/// use rolebot_social::{OptionsSchema, OptionKind};
///
/// #[derive(Default)]
/// struct AddRole {
///     list_id: i64,
///     emoji: String,
/// }
///
/// let schema = OptionsSchema::<AddRole>::new()
///     .integer("list_id", |o, v| o.list_id = v)
///     .bind("list-id")
///     .string("emoji", |o, v| o.emoji = v);
///
/// let bindings: Vec<_> = schema.fields().iter().map(|f| (f.option(), f.kind())).collect();
/// assert_eq!(bindings, vec![("list-id", OptionKind::Integer), ("emoji", OptionKind::String)]);
/// ```
pub struct OptionsSchema<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T> Default for OptionsSchema<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> OptionsSchema<T> {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    fn field(mut self, field: &'static str, setter: FieldSetter<T>) -> Self {
        self.fields.push(FieldBinding {
            field,
            option: field,
            setter,
        });
        self
    }

    /// Add a text field.
    pub fn string(self, field: &'static str, set: fn(&mut T, String)) -> Self {
        self.field(field, FieldSetter::String(set))
    }

    /// Add a whole number field.
    pub fn integer(self, field: &'static str, set: fn(&mut T, i64)) -> Self {
        self.field(field, FieldSetter::Integer(set))
    }

    /// Add a flag field.
    pub fn boolean(self, field: &'static str, set: fn(&mut T, bool)) -> Self {
        self.field(field, FieldSetter::Boolean(set))
    }

    /// Add a floating point field.
    pub fn number(self, field: &'static str, set: fn(&mut T, f64)) -> Self {
        self.field(field, FieldSetter::Number(set))
    }

    /// Bind the most recently added field to a differently named option.
    pub fn bind(mut self, option: &'static str) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.option = option;
        }
        self
    }

    /// Bindings in declaration order.
    pub fn fields(&self) -> &[FieldBinding<T>] {
        &self.fields
    }
}

/// A record that command options can be decoded into.
pub trait CommandOptions: Default {
    /// Field bindings, in declaration order.
    fn schema() -> OptionsSchema<Self>;
}

/// The empty record, for commands that take no options.
impl CommandOptions for () {
    fn schema() -> OptionsSchema<Self> {
        OptionsSchema::<Self>::new()
    }
}

/// One reason decoding failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OptionProblem {
    /// The option's type does not match its field
    #[display("field '{}' expects {} but option '{}' is {}", field, expected, option, found)]
    TypeMismatch {
        /// Field name
        field: String,
        /// Option name
        option: String,
        /// Field's kind
        expected: OptionKind,
        /// Option's kind
        found: OptionKind,
    },
    /// The option's type cannot be held by any field
    #[display("option '{}' for field '{}' has unsupported type {}", option, field, found)]
    Unsupported {
        /// Field name
        field: String,
        /// Option name
        option: String,
        /// Option's kind
        found: OptionKind,
    },
    /// No field is bound to the option
    #[display("option '{}' has no matching field", _0)]
    Unconsumed(String),
}

/// Every problem found while decoding one option tree.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
pub struct OptionsError {
    problems: Vec<OptionProblem>,
}

impl OptionsError {
    /// Problems in field order, followed by unconsumed options sorted by name.
    pub fn problems(&self) -> &[OptionProblem] {
        &self.problems
    }

    /// Names of options no field consumed.
    pub fn unconsumed(&self) -> Vec<&str> {
        self.problems
            .iter()
            .filter_map(|problem| match problem {
                OptionProblem::Unconsumed(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode command options: ")?;
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", problem)?;
        }
        Ok(())
    }
}

/// The option set a command's fields are read from.
///
/// When the top level holds a sub-command or sub-command group node, its
/// children are used. Only one level is descended.
pub fn working_options(options: &[CommandOption]) -> &[CommandOption] {
    options
        .iter()
        .find_map(CommandOption::children)
        .unwrap_or(options)
}

/// Decode an option tree into `T`.
///
/// # Errors
///
/// Returns every type mismatch and every option no field is bound to.
///
/// # Example
///
/// ```
/// use rolebot_social::{decode_options, CommandOption, CommandOptions, OptionsSchema};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Create {
///     name: String,
/// }
///
/// impl CommandOptions for Create {
///     fn schema() -> OptionsSchema<Self> {
///         OptionsSchema::<Self>::new().string("name", |o, v| o.name = v)
///     }
/// }
///
/// let tree = vec![CommandOption::sub_command(
///     "create",
///     vec![CommandOption::string("name", "Admins")],
/// )];
/// let create: Create = decode_options(&tree).unwrap();
/// assert_eq!(create.name, "Admins");
/// ```
pub fn decode_options<T: CommandOptions>(options: &[CommandOption]) -> Result<T, OptionsError> {
    let working = working_options(options);

    let by_name: HashMap<&str, &OptionValue> = working
        .iter()
        .map(|option| (option.name.as_str(), &option.value))
        .collect();
    let mut seen: HashMap<&str, bool> = by_name.keys().map(|name| (*name, false)).collect();

    let mut target = T::default();
    let mut problems = Vec::new();

    for binding in T::schema().fields() {
        let Some(value) = by_name.get(binding.option) else {
            continue;
        };
        // A present option counts as consumed even when its type is wrong,
        // so it is reported once, as a mismatch.
        seen.insert(binding.option, true);

        if binding.setter.apply(&mut target, value) {
            continue;
        }

        let found = value.kind();
        problems.push(if found.is_scalar() {
            OptionProblem::TypeMismatch {
                field: binding.field.to_string(),
                option: binding.option.to_string(),
                expected: binding.kind(),
                found,
            }
        } else {
            OptionProblem::Unsupported {
                field: binding.field.to_string(),
                option: binding.option.to_string(),
                found,
            }
        });
    }

    let mut unconsumed: Vec<&str> = seen
        .into_iter()
        .filter(|(_, consumed)| !consumed)
        .map(|(name, _)| name)
        .collect();
    unconsumed.sort_unstable();
    problems.extend(
        unconsumed
            .into_iter()
            .map(|name| OptionProblem::Unconsumed(name.to_string())),
    );

    if problems.is_empty() {
        Ok(target)
    } else {
        Err(OptionsError { problems })
    }
}

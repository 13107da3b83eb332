//! Dockerfile instructions and their formatting rules.
//!
//! Each [`Instruction`] renders to exactly one (possibly multi-line) entry of
//! the generated Dockerfile through its [`Display`](fmt::Display) impl.
//!
//! ```text
//! RUN cd test                     Value::Single
//! RUN ["a", "echo \"hey\""]       Value::Sequence
//! LABEL "k1"="v1" \
//! 	"k2"="v2"                    Pair::Map
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// Separator between entries of a multi-pair LABEL or ENV.
const LINE_CONTINUATION: &str = " \\\n\t";

/// Escapes a value for use in a Dockerfile instruction.
///
/// Every `"` becomes `\"`; nothing else is touched.
pub fn escape(input: &str) -> String {
    input.replace('"', "\\\"")
}

/// Argument of instructions that accept either the shell form or the exec form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `KEYWORD value`
    Single(String),
    /// `KEYWORD ["v1", "v2"]`
    Sequence(Vec<String>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for Value {
    fn from(values: Vec<S>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Value {
    fn from(values: [S; N]) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// Argument of LABEL and ENV: one key/value pair or an ordered mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pair {
    Single(String, String),
    /// Entries render in the order given.
    Map(Vec<(String, String)>),
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Pair {
    fn from((key, value): (K, V)) -> Self {
        Self::Single(key.into(), value.into())
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Pair {
    fn from(entries: Vec<(K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Pair {
    fn from(entries: [(K, V); N]) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Pair {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Argument of EXPOSE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ports {
    Single(u16),
    List(Vec<u16>),
}

impl From<u16> for Ports {
    fn from(port: u16) -> Self {
        Self::Single(port)
    }
}

impl From<Vec<u16>> for Ports {
    fn from(ports: Vec<u16>) -> Self {
        Self::List(ports)
    }
}

impl<const N: usize> From<[u16; N]> for Ports {
    fn from(ports: [u16; N]) -> Self {
        Self::List(ports.to_vec())
    }
}

/// Argument of STOPSIGNAL: a signal number or a name such as `SIGKILL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Number(i32),
    Name(String),
}

impl From<i32> for Signal {
    fn from(signal: i32) -> Self {
        Self::Number(signal)
    }
}

impl From<&str> for Signal {
    fn from(signal: &str) -> Self {
        Self::Name(signal.to_owned())
    }
}

impl From<String> for Signal {
    fn from(signal: String) -> Self {
        Self::Name(signal)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A single Dockerfile instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    From {
        image: String,
        /// Omitted from the output when `None` or empty.
        tag: Option<String>,
    },
    Maintainer(String),
    Run(Value),
    Cmd(Value),
    Label(Pair),
    Expose(Ports),
    Env(Pair),
    Add {
        sources: Value,
        destination: String,
    },
    Copy {
        sources: Value,
        destination: String,
    },
    Entrypoint(Value),
    Volume(Value),
    User(String),
    Workdir(String),
    Arg {
        name: String,
        default: Option<String>,
    },
    Onbuild(String),
    StopSignal(Signal),
}

impl Instruction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::From { .. } => "FROM",
            Self::Maintainer(_) => "MAINTAINER",
            Self::Run(_) => "RUN",
            Self::Cmd(_) => "CMD",
            Self::Label(_) => "LABEL",
            Self::Expose(_) => "EXPOSE",
            Self::Env(_) => "ENV",
            Self::Add { .. } => "ADD",
            Self::Copy { .. } => "COPY",
            Self::Entrypoint(_) => "ENTRYPOINT",
            Self::Volume(_) => "VOLUME",
            Self::User(_) => "USER",
            Self::Workdir(_) => "WORKDIR",
            Self::Arg { .. } => "ARG",
            Self::Onbuild(_) => "ONBUILD",
            Self::StopSignal(_) => "STOPSIGNAL",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            Self::From { image, tag } => match tag.as_deref() {
                Some(tag) if !tag.is_empty() => write!(f, "{keyword} {image}:{tag}"),
                _ => write!(f, "{keyword} {image}"),
            },
            Self::Maintainer(value)
            | Self::User(value)
            | Self::Workdir(value)
            | Self::Onbuild(value) => write!(f, "{keyword} {value}"),
            Self::Run(value) | Self::Cmd(value) | Self::Entrypoint(value) | Self::Volume(value) => {
                match value {
                    Value::Single(s) => write!(f, "{keyword} {}", escape(s)),
                    Value::Sequence(items) => write!(f, "{keyword} {}", exec_form(items)),
                }
            }
            Self::Label(pair) => {
                let entries = match pair {
                    Pair::Single(key, value) => label_entry(key, value),
                    Pair::Map(entries) => entries
                        .iter()
                        .map(|(k, v)| label_entry(k, v))
                        .collect::<Vec<_>>()
                        .join(LINE_CONTINUATION),
                };
                write!(f, "{keyword} {entries}")
            }
            Self::Expose(ports) => match ports {
                Ports::Single(port) => write!(f, "{keyword} {port}"),
                Ports::List(ports) => {
                    let ports: Vec<String> = ports.iter().map(u16::to_string).collect();
                    write!(f, "{keyword} {}", ports.join(" "))
                }
            },
            Self::Env(pair) => match pair {
                Pair::Single(key, value) => write!(f, "{keyword} {key} {value}"),
                Pair::Map(entries) => {
                    let entries: Vec<String> = entries
                        .iter()
                        .map(|(k, v)| format!("{k}=\"{}\"", escape(v)))
                        .collect();
                    write!(f, "{keyword} {}", entries.join(LINE_CONTINUATION))
                }
            },
            Self::Add {
                sources,
                destination,
            }
            | Self::Copy {
                sources,
                destination,
            } => match sources {
                Value::Single(src) => {
                    write!(f, "{keyword} {} {}", escape(src), escape(destination))
                }
                Value::Sequence(srcs) => {
                    let mut items = srcs.clone();
                    items.push(destination.clone());
                    write!(f, "{keyword} {}", exec_form(&items))
                }
            },
            Self::Arg { name, default } => match default {
                Some(default) => write!(f, "{keyword} {name}={default}"),
                None => write!(f, "{keyword} {name}"),
            },
            Self::StopSignal(signal) => write!(f, "{keyword} {signal}"),
        }
    }
}

/// `["a", "b"]` with each element escaped.
fn exec_form(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_owned();
    }
    let escaped: Vec<String> = items.iter().map(|s| escape(s)).collect();
    format!("[\"{}\"]", escaped.join("\", \""))
}

fn label_entry(key: &str, value: &str) -> String {
    format!("\"{}\"=\"{}\"", escape(key), escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_touches_double_quotes() {
        assert_eq!(escape(r#"say "hi" 'there' \n"#), r#"say \"hi\" 'there' \n"#);
        assert_eq!(escape(""), "");
    }

    #[test]
    fn exec_form_of_empty_sequence() {
        assert_eq!(exec_form(&[]), "[]");
    }

    #[test]
    fn keyword_matches_variant() {
        assert_eq!(Instruction::Onbuild("RUN x".to_owned()).keyword(), "ONBUILD");
        assert_eq!(Instruction::StopSignal(9.into()).keyword(), "STOPSIGNAL");
    }
}

//! Compiled predicate evaluation for in-memory stores.
//!
//! A [`PredicateNode`] tree is validated and compiled once per read into a
//! [`Matcher`]; regular expressions are built at compile time so evaluation
//! over every document stays cheap.

use std::cmp::Ordering;

use anyhow::{anyhow, bail};
use pagewise_core::{Document, PredicateNode, PredicateOp, Value};
use regex::Regex;

static NULL: Value = Value::Null;

/// Executable form of a predicate tree.
#[derive(Debug)]
pub enum Matcher {
    /// Matches every document (empty filter).
    All,
    Compare {
        field: String,
        op: PredicateOp,
        value: Value,
    },
    Pattern {
        field: String,
        regex: Regex,
    },
    And(Vec<Matcher>),
    Or(Vec<Matcher>),
    Not(Box<Matcher>),
}

impl Matcher {
    /// Compiles an optional filter; `None` matches everything.
    pub fn compile(filter: Option<&PredicateNode>) -> anyhow::Result<Self> {
        match filter {
            None => Ok(Matcher::All),
            Some(node) => Self::compile_node(node),
        }
    }

    fn compile_node(node: &PredicateNode) -> anyhow::Result<Self> {
        match node.op {
            PredicateOp::And | PredicateOp::Or => {
                let children = node
                    .children
                    .as_deref()
                    .ok_or_else(|| anyhow!("{:?} predicate requires children", node.op))?
                    .iter()
                    .map(Self::compile_node)
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(if node.op == PredicateOp::And {
                    Matcher::And(children)
                } else {
                    Matcher::Or(children)
                })
            }
            PredicateOp::Not => match node.children.as_deref() {
                Some([child]) => Ok(Matcher::Not(Box::new(Self::compile_node(child)?))),
                _ => bail!("not predicate requires exactly one child"),
            },
            PredicateOp::Like | PredicateOp::Regex => {
                let field = leaf_attribute(node)?;
                let Some(Value::String(pattern)) = &node.value else {
                    bail!("{:?} predicate on {field} requires a string pattern", node.op);
                };
                let source = if node.op == PredicateOp::Like {
                    like_to_regex(pattern)
                } else {
                    pattern.clone()
                };
                Ok(Matcher::Pattern {
                    field,
                    regex: Regex::new(&source)?,
                })
            }
            op => {
                let field = leaf_attribute(node)?;
                let value = node
                    .value
                    .clone()
                    .ok_or_else(|| anyhow!("{op:?} predicate on {field} requires a value"))?;
                Ok(Matcher::Compare { field, op, value })
            }
        }
    }

    /// Evaluates the matcher against `doc`.
    ///
    /// Missing fields compare equal to `null`. Comparisons use
    /// [`Value::total_cmp`], the order documents are sorted by, so a range
    /// condition across types agrees with the sort.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Compare { field, op, value } => {
                let actual = doc.lookup(field);
                let actual = actual.as_deref().unwrap_or(&NULL);
                let ordering = actual.total_cmp(value);
                match op {
                    PredicateOp::Eq => ordering == Ordering::Equal,
                    PredicateOp::Neq => ordering != Ordering::Equal,
                    PredicateOp::Gt => ordering == Ordering::Greater,
                    PredicateOp::Gte => ordering != Ordering::Less,
                    PredicateOp::Lt => ordering == Ordering::Less,
                    PredicateOp::Lte => ordering != Ordering::Greater,
                    _ => false,
                }
            }
            Matcher::Pattern { field, regex } => match doc.lookup(field).as_deref() {
                Some(Value::String(s)) => regex.is_match(s),
                _ => false,
            },
            Matcher::And(children) => children.iter().all(|m| m.matches(doc)),
            Matcher::Or(children) => children.iter().any(|m| m.matches(doc)),
            Matcher::Not(child) => !child.matches(doc),
        }
    }
}

fn leaf_attribute(node: &PredicateNode) -> anyhow::Result<String> {
    node.attribute
        .clone()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| anyhow!("{:?} predicate requires an attribute", node.op))
}

/// Translates a SQL-style `LIKE` pattern (`%`, `_`) into an anchored regex.
fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    out.push('^');
    for c in pattern.chars() {
        match c {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}

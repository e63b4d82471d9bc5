//! 一阶逻辑项
//!
//! 小写字母开头的标识符是变量，其余是常量/函数/谓词符号。

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 变量绑定
pub type Substitution = BTreeMap<String, Term>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Var(String),
    /// 常量是没有参数的 `Fn`
    Fn { name: String, args: Vec<Term> },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Term {
        Term::Var(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Term {
        Term::Fn {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn func(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Fn {
            name: name.into(),
            args,
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// 谓词/函数符号与元数；变量返回 None
    pub fn signature(&self) -> Option<(&str, usize)> {
        match self {
            Term::Var(_) => None,
            Term::Fn { name, args } => Some((name.as_str(), args.len())),
        }
    }

    /// 单次替换：绑定值本身不再展开
    pub fn subst(&self, theta: &Substitution) -> Term {
        match self {
            Term::Var(v) => theta.get(v).cloned().unwrap_or_else(|| self.clone()),
            Term::Fn { name, args } => Term::Fn {
                name: name.clone(),
                args: args.iter().map(|a| a.subst(theta)).collect(),
            },
        }
    }

    /// 替换到不动点（依赖 occurs check 保证绑定无环）
    pub fn resolve(&self, theta: &Substitution) -> Term {
        match self {
            Term::Var(v) => match theta.get(v) {
                Some(bound) if bound != self => bound.resolve(theta),
                _ => self.clone(),
            },
            Term::Fn { name, args } => Term::Fn {
                name: name.clone(),
                args: args.iter().map(|a| a.resolve(theta)).collect(),
            },
        }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut BTreeSet<String>) {
        match self {
            Term::Var(v) => {
                out.insert(v.clone());
            }
            Term::Fn { args, .. } => args.iter().for_each(|a| a.collect_vars(out)),
        }
    }

    /// 按映射重命名变量
    pub fn rename_vars(&self, names: &BTreeMap<String, String>) -> Term {
        match self {
            Term::Var(v) => Term::Var(names.get(v).cloned().unwrap_or_else(|| v.clone())),
            Term::Fn { name, args } => Term::Fn {
                name: name.clone(),
                args: args.iter().map(|a| a.rename_vars(names)).collect(),
            },
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{v}"),
            Term::Fn { name, args } if args.is_empty() => write!(f, "{name}"),
            Term::Fn { name, args } => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}

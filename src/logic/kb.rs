//! 定子句知识库

use super::parse::parse_clause;
use super::term::Term;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// 教科书中的犯罪知识库（West 是罪犯）
pub const CRIME_KB: [&str; 8] = [
    "(American(x) & Weapon(y) & Sells(x, y, z) & Hostile(z)) ==> Criminal(x)",
    "Owns(Nono, M1)",
    "Missile(M1)",
    "(Missile(x) & Owns(Nono, x)) ==> Sells(West, x, Nono)",
    "Missile(x) ==> Weapon(x)",
    "Enemy(x, America) ==> Hostile(x)",
    "American(West)",
    "Enemy(Nono, America)",
];

/// 定子句：前件合取蕴含结论；事实的前件为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub antecedents: Vec<Term>,
    pub consequent: Term,
}

impl Clause {
    pub fn is_fact(&self) -> bool {
        self.antecedents.is_empty()
    }

    /// 把子句中的变量换成新名字 `v_{n}`，`next` 为共享计数器
    pub fn standardize(&self, next: &mut usize) -> Clause {
        let mut vars = self.consequent.variables();
        for a in &self.antecedents {
            vars.extend(a.variables());
        }
        let names = vars
            .into_iter()
            .map(|v| {
                let fresh = format!("v_{}", *next);
                *next += 1;
                (v, fresh)
            })
            .collect::<BTreeMap<_, _>>();
        Clause {
            antecedents: self.antecedents.iter().map(|a| a.rename_vars(&names)).collect(),
            consequent: self.consequent.rename_vars(&names),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fact() {
            return write!(f, "{}", self.consequent);
        }
        write!(f, "(")?;
        for (i, a) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, ") ==> {}", self.consequent)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FolKb {
    clauses: Vec<Clause>,
}

impl FolKb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sentences<S: AsRef<str>>(sentences: &[S]) -> Result<Self> {
        let mut kb = Self::new();
        for s in sentences {
            kb.tell(s.as_ref())?;
        }
        Ok(kb)
    }

    pub fn crime() -> Result<Self> {
        Self::from_sentences(&CRIME_KB)
    }

    /// 加入一条句子；非定子句报 `InvalidInput`
    pub fn tell(&mut self, sentence: &str) -> Result<()> {
        let clause = parse_clause(sentence)?;
        debug!(%clause, "tell");
        self.clauses.push(clause);
        Ok(())
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// 结论谓词与目标同名同元数的子句（按加入顺序）
    pub fn fetch_rules_for_goal<'a>(&'a self, goal: &Term) -> impl Iterator<Item = &'a Clause> + 'a {
        let sig = goal.signature().map(|(n, a)| (n.to_string(), a));
        self.clauses.iter().filter(move |c| match &sig {
            Some((name, arity)) => c.consequent.signature() == Some((name.as_str(), *arity)),
            None => true,
        })
    }
}

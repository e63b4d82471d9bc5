//! 句子解析
//!
//! 支持的语法：
//! - 原子：`Sells(West, M1, Nono)`、`Missile(x)`、`Raining`
//! - 定子句：`(American(x) & Weapon(y)) ==> Criminal(x)`，`&` 两侧括号可省略
//!
//! 只接受定子句；其它联结词直接报错。

use super::kb::Clause;
use super::term::Term;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    LParen,
    RParen,
    Comma,
    And,
    Implies,
}

fn tokenize(src: &str) -> Result<Vec<Tok>> {
    let mut out = Vec::new();
    let chars = src.chars().collect::<Vec<_>>();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                out.push(Tok::LParen);
                i += 1;
            }
            ')' => {
                out.push(Tok::RParen);
                i += 1;
            }
            ',' => {
                out.push(Tok::Comma);
                i += 1;
            }
            '&' => {
                out.push(Tok::And);
                i += 1;
            }
            '=' if chars.get(i + 1) == Some(&'=') && chars.get(i + 2) == Some(&'>') => {
                out.push(Tok::Implies);
                i += 3;
            }
            c if c.is_alphanumeric() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                out.push(Tok::Ident(chars[start..i].iter().collect()));
            }
            other => {
                return Err(Error::invalid(format!(
                    "unexpected character {other:?} in {src:?}"
                )));
            }
        }
    }
    Ok(out)
}

struct Parser<'a> {
    src: &'a str,
    toks: Vec<Tok>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self> {
        Ok(Self {
            src,
            toks: tokenize(src)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn next(&mut self) -> Option<Tok> {
        let t = self.toks.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expect(&mut self, want: Tok) -> Result<()> {
        match self.next() {
            Some(t) if t == want => Ok(()),
            got => Err(self.error(format!("expected {want:?}, got {got:?}"))),
        }
    }

    fn error(&self, msg: String) -> Error {
        Error::invalid(format!("{msg} while parsing {:?}", self.src))
    }

    fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(t) => Err(self.error(format!("trailing token {t:?}"))),
        }
    }

    fn term(&mut self) -> Result<Term> {
        let name = match self.next() {
            Some(Tok::Ident(name)) => name,
            got => return Err(self.error(format!("expected identifier, got {got:?}"))),
        };
        if self.peek() != Some(&Tok::LParen) {
            return Ok(if is_variable_name(&name) {
                Term::Var(name)
            } else {
                Term::constant(name)
            });
        }
        if is_variable_name(&name) {
            return Err(self.error(format!("variable {name} cannot take arguments")));
        }
        self.expect(Tok::LParen)?;
        let mut args = vec![self.term()?];
        while self.peek() == Some(&Tok::Comma) {
            self.next();
            args.push(self.term()?);
        }
        self.expect(Tok::RParen)?;
        Ok(Term::func(name, args))
    }

    fn atom(&mut self) -> Result<Term> {
        let t = self.term()?;
        if t.is_var() {
            return Err(self.error(format!("{t} is a variable, not an atomic sentence")));
        }
        Ok(t)
    }

    /// conj := group ('&' group)*
    fn conjunction(&mut self) -> Result<Vec<Term>> {
        let mut out = self.group()?;
        while self.peek() == Some(&Tok::And) {
            self.next();
            out.extend(self.group()?);
        }
        Ok(out)
    }

    /// group := '(' conj ')' | atom
    fn group(&mut self) -> Result<Vec<Term>> {
        if self.peek() == Some(&Tok::LParen) {
            self.next();
            let inner = self.conjunction()?;
            self.expect(Tok::RParen)?;
            Ok(inner)
        } else {
            Ok(vec![self.atom()?])
        }
    }
}

pub fn is_variable_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_lowercase())
}

/// 解析一个原子句子（用作查询）
pub fn parse_atom(src: &str) -> Result<Term> {
    let mut p = Parser::new(src)?;
    let t = p.atom()?;
    p.finish()?;
    Ok(t)
}

/// 解析一条定子句：事实或 `前件 ==> 结论`
pub fn parse_clause(src: &str) -> Result<Clause> {
    let mut p = Parser::new(src)?;
    let lhs = p.conjunction()?;
    if p.peek() == Some(&Tok::Implies) {
        p.next();
        let consequent = p.atom()?;
        p.finish()?;
        return Ok(Clause {
            antecedents: lhs,
            consequent,
        });
    }
    p.finish()?;
    match <[Term; 1]>::try_from(lhs) {
        Ok([fact]) => Ok(Clause {
            antecedents: Vec::new(),
            consequent: fact,
        }),
        Err(_) => Err(Error::invalid(format!(
            "{src:?} is not a definite clause (conjunction without ==>)"
        ))),
    }
}

//! 合一（带 occurs check）

use super::term::{Substitution, Term};

/// 返回使 `x` 与 `y` 相同的最一般合一子（在 `theta` 基础上扩展），失败返回 None。
pub fn unify(x: &Term, y: &Term, theta: Substitution) -> Option<Substitution> {
    if x == y {
        return Some(theta);
    }
    match (x, y) {
        (Term::Var(v), _) => unify_var(v, x, y, theta),
        (_, Term::Var(v)) => unify_var(v, y, x, theta),
        (
            Term::Fn {
                name: xn,
                args: xa,
            },
            Term::Fn {
                name: yn,
                args: ya,
            },
        ) => {
            if xn != yn || xa.len() != ya.len() {
                return None;
            }
            xa.iter()
                .zip(ya)
                .try_fold(theta, |theta, (a, b)| unify(a, b, theta))
        }
    }
}

fn unify_var(name: &str, var: &Term, x: &Term, mut theta: Substitution) -> Option<Substitution> {
    if let Some(bound) = theta.get(name).cloned() {
        return unify(&bound, x, theta);
    }
    if let Term::Var(other) = x {
        if let Some(bound) = theta.get(other).cloned() {
            return unify(var, &bound, theta);
        }
    }
    if occurs(name, x, &theta) {
        return None;
    }
    theta.insert(name.to_string(), x.clone());
    Some(theta)
}

/// `name` 是否出现在 `x` 中（沿绑定展开）
fn occurs(name: &str, x: &Term, theta: &Substitution) -> bool {
    match x {
        Term::Var(v) if v == name => true,
        Term::Var(v) => theta.get(v).is_some_and(|b| occurs(name, b, theta)),
        Term::Fn { args, .. } => args.iter().any(|a| occurs(name, a, theta)),
    }
}

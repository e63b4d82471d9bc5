use crate::error::Error;
use crate::logic::{Clause, FolKb, Substitution, Term, is_variable_name, parse_atom, parse_clause, unify};

fn t(src: &str) -> Term {
    parse_atom(src).expect("atom")
}

#[test]
fn parse_atoms_and_variables() {
    assert_eq!(
        t("Sells(West, x, Nono)"),
        Term::func(
            "Sells",
            vec![Term::constant("West"), Term::var("x"), Term::constant("Nono")]
        )
    );
    assert_eq!(t("Raining"), Term::constant("Raining"));
    assert_eq!(t("Knows(John, Mother(y))").to_string(), "Knows(John, Mother(y))");
    assert!(is_variable_name("x1"));
    assert!(!is_variable_name("M1"));
}

#[test]
fn parse_rejects_malformed_sentences() {
    for bad in ["Foo(x", "Foo(x))", "x", "x(A)", "A | B", ""] {
        assert!(
            matches!(parse_atom(bad), Err(Error::InvalidInput(_))),
            "{bad:?} should not parse"
        );
    }
    // 没有 ==> 的合取不是定子句
    assert!(matches!(
        parse_clause("American(x) & Weapon(y)"),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn parse_definite_clauses() {
    let rule = parse_clause("(Missile(x) & Owns(Nono, x)) ==> Sells(West, x, Nono)").expect("rule");
    assert_eq!(rule.antecedents.len(), 2);
    assert_eq!(rule.consequent, t("Sells(West, x, Nono)"));
    assert!(!rule.is_fact());
    assert_eq!(
        rule.to_string(),
        "(Missile(x) & Owns(Nono, x)) ==> Sells(West, x, Nono)"
    );

    let unbracketed = parse_clause("Missile(x) & Owns(Nono, x) ==> Sells(West, x, Nono)")
        .expect("brackets are optional");
    assert_eq!(unbracketed, rule);

    let fact = parse_clause("Owns(Nono, M1)").expect("fact");
    assert!(fact.is_fact());
}

#[test]
fn unify_binds_variables() {
    let theta = unify(&t("Knows(John, x)"), &t("Knows(John, Jane)"), Substitution::new())
        .expect("unifies");
    assert_eq!(theta.get("x"), Some(&Term::constant("Jane")));

    let theta = unify(&t("Knows(John, x)"), &t("Knows(y, Mother(y))"), Substitution::new())
        .expect("unifies");
    assert_eq!(t("Knows(John, x)").resolve(&theta).to_string(), "Knows(John, Mother(John))");
}

#[test]
fn unify_fails_on_clashes() {
    assert!(unify(&t("Knows(John, x)"), &t("Knows(x, Elizabeth)"), Substitution::new()).is_none());
    assert!(unify(&t("P(A)"), &t("Q(A)"), Substitution::new()).is_none());
    assert!(unify(&t("P(A, B)"), &t("P(A)"), Substitution::new()).is_none());
}

#[test]
fn occurs_check_rejects_cyclic_binding() {
    let x = Term::var("x");
    let fx = Term::func("F", vec![Term::var("x")]);
    assert!(unify(&x, &fx, Substitution::new()).is_none());

    // x -> y 之后 y 与 F(x) 同样成环
    let theta = unify(&x, &Term::var("y"), Substitution::new()).expect("var-var");
    assert!(unify(&Term::var("y"), &fx, theta).is_none());
}

#[test]
fn subst_is_single_pass_resolve_is_fixpoint() {
    let mut theta = Substitution::new();
    theta.insert("x".into(), Term::var("y"));
    theta.insert("y".into(), Term::constant("A"));
    let p = t("P(x)");
    assert_eq!(p.subst(&theta), t("P(y)"));
    assert_eq!(p.resolve(&theta), t("P(A)"));
}

#[test]
fn standardize_uses_fresh_names_per_counter() {
    let rule: Clause = parse_clause("(Missile(x) & Owns(Nono, x)) ==> Sells(West, x, Nono)")
        .expect("rule");
    let mut next = 0;
    let a = rule.standardize(&mut next);
    let b = rule.standardize(&mut next);
    assert_eq!(next, 2);
    assert_eq!(a.consequent.to_string(), "Sells(West, v_0, Nono)");
    assert_eq!(b.consequent.to_string(), "Sells(West, v_1, Nono)");
    assert!(a.consequent.variables().is_disjoint(&b.consequent.variables()));
}

#[test]
fn fetch_rules_matches_predicate_and_arity() {
    let kb = FolKb::crime().expect("kb");
    assert_eq!(kb.len(), 8);
    let missile = kb.fetch_rules_for_goal(&t("Missile(z)")).collect::<Vec<_>>();
    assert_eq!(missile.len(), 1);
    assert!(missile[0].is_fact());
    assert_eq!(kb.fetch_rules_for_goal(&t("Hostile(z)")).count(), 1);
    assert_eq!(kb.fetch_rules_for_goal(&t("Missile(z, w)")).count(), 0);
}

#[test]
fn tell_rejects_non_definite_sentences() {
    let mut kb = FolKb::new();
    assert!(kb.tell("A & B").is_err());
    assert!(kb.is_empty());
    kb.tell("A ==> B").expect("definite");
    assert_eq!(kb.len(), 1);
}

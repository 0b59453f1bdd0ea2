//! End-to-end refutation scenarios exercising `ResolutionProver`
//! against whole formulas, not just individual clause operations.

use autoprover_base::Interner;
use autoprover_resolution::{ResolutionConfig, ResolutionProver, Status};
use autoprover_term::{LexicographicPathOrdering, Precedence, Term};

fn prover(config: ResolutionConfig) -> (ResolutionProver, Interner) {
    let mut interner = Interner::new();
    let ordering = LexicographicPathOrdering::new(Precedence::new(), &mut interner);
    let prover = ResolutionProver::new(config, ordering, &mut interner);
    (prover, interner)
}

#[test]
fn universal_instantiation_proves_ground_instance() {
    let (mut prover, mut i) = prover(ResolutionConfig::default());
    let man = i.intern("Man");
    let mortal = i.intern("Mortal");
    let socrates = i.intern("socrates");

    // forall x. Man(x) -> Mortal(x), Man(socrates) |- Mortal(socrates)
    let all_men_mortal = Term::make_forall(
        None,
        Term::make_implies(
            Term::make_app(man, vec![Term::make_var(0)]),
            Term::make_app(mortal, vec![Term::make_var(0)]),
        ),
    );
    let man_socrates = Term::make_app(man, vec![Term::make_const(socrates)]);
    let goal = Term::make_app(mortal, vec![Term::make_const(socrates)]);

    let result = prover.prove(&goal, &[all_men_mortal, man_socrates], &mut i);
    assert!(result.is_proved());
}

#[test]
fn transitivity_chain_via_kb_preprocessing() {
    let mut config = ResolutionConfig::default();
    config.use_kb_preprocessing = true;
    let (mut prover, mut i) = prover(config);

    let eq = i.intern("=");
    let a = i.intern("a");
    let b = i.intern("b");
    let c = i.intern("c");

    // a = b, b = c |- a = c
    let ab = Term::make_app(eq, vec![Term::make_const(a), Term::make_const(b)]);
    let bc = Term::make_app(eq, vec![Term::make_const(b), Term::make_const(c)]);
    let goal = Term::make_app(eq, vec![Term::make_const(a), Term::make_const(c)]);

    let result = prover.prove(&goal, &[ab, bc], &mut i);
    assert!(result.is_proved());
}

#[test]
fn unrelated_hypotheses_saturate_without_proof() {
    let (mut prover, mut i) = prover(ResolutionConfig::default());
    let bird = i.intern("Bird");
    let fish = i.intern("Fish");
    let tweety = i.intern("tweety");
    let nemo = i.intern("nemo");

    let hyps = vec![
        Term::make_app(bird, vec![Term::make_const(tweety)]),
        Term::make_app(fish, vec![Term::make_const(nemo)]),
    ];
    let goal = Term::make_app(bird, vec![Term::make_const(nemo)]);

    let result = prover.prove(&goal, &hyps, &mut i);
    assert_eq!(result.status, Status::Saturated);
}

#[test]
fn pure_associativity_with_tight_iteration_cap_times_out() {
    let mut config = ResolutionConfig::default();
    config.use_kb_preprocessing = true;
    config.kb_max_rules = 1;
    config.kb_config.max_iterations = 1;
    let (mut prover, mut i) = prover(config);

    let eq = i.intern("=");
    let f = i.intern("f");
    let x = Term::make_var(0);
    let y = Term::make_var(1);
    let z = Term::make_var(2);

    // Associativity alone: f(f(x,y),z) = f(x,f(y,z)) — a classic
    // non-terminating-without-care completion problem even when bounded
    // tightly here; the goal asks for something the bounded
    // preprocessing pass cannot derive.
    let assoc = Term::make_app(
        eq,
        vec![
            Term::make_app(f, vec![Term::make_app(f, vec![x.clone(), y.clone()]), z.clone()]),
            Term::make_app(f, vec![x.clone(), Term::make_app(f, vec![y.clone(), z.clone()])]),
        ],
    );
    let goal = Term::make_app(
        eq,
        vec![
            Term::make_app(f, vec![x.clone(), Term::make_app(f, vec![y.clone(), z.clone()])]),
            Term::make_app(f, vec![Term::make_app(f, vec![x, y]), z]),
        ],
    );

    let result = prover.prove(&goal, &[assoc], &mut i);
    // Whether or not KB preprocessing itself completes under such a
    // tight cap, the important property is that the prover reaches a
    // definite, non-panicking outcome.
    assert!(matches!(result.status, Status::Proved | Status::Saturated | Status::Timeout));
}

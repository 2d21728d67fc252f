// Verse calculus rewriting engine
//
// Based on "The Verse Calculus: A Core Calculus for Deterministic Functional
// Logic Programming" by Lennart Augustsson, Joachim Breitner, Koen Claessen,
// Ranjit Jhala, Simon Peyton Jones, Olin Shivers, Guy L. Steele Jr.,
// and Tim Sweeney
// https://dl.acm.org/doi/abs/10.1145/3607845
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// tests/end_to_end_test.rs
// Whole programs, built in core form, rewritten to their final values

use verse_core::*;

const MAX_STEPS: usize = 5000;

/// Drive a program to fixpoint with a step bound, printing the trace so a
/// failing test shows where it got stuck.
fn run(program: Program) -> Expr {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut names = NameSupply::new();
    names.reserve_program(&program.expr);
    let mut current = program.expr;
    let mut step_count = 0;
    loop {
        let order = BinderOrder::of(&current);
        match rewrite_step(&current, &mut names, &order) {
            None => {
                println!("End: {}", current);
                return current;
            }
            Some((rule, next)) => {
                step_count += 1;
                if step_count >= MAX_STEPS {
                    panic!("no fixpoint after {} steps: {}", step_count, current);
                }
                println!("{} {} {}", step_count, rule, next);
                current = next;
            }
        }
    }
}

fn add(a: Value, b: Value) -> Expr {
    Expr::app(Value::op(PrimOp::Add), Value::tuple(vec![a, b]))
}

/// `x = e; rest` as a chained equation.
fn def(x: &str, e: Expr, rest: Expr) -> Expr {
    Expr::seq(Expr::eqn(Value::var(x), e), rest)
}

#[test]
fn test_tuple_unification_resolves_nested_unknowns() {
    // one{∃x y z. x = ⟨y, 3⟩; x = ⟨2, z⟩; y} → 2
    let body = Expr::exists(
        Var::new("x"),
        Expr::exists(
            Var::new("y"),
            Expr::exists(
                Var::new("z"),
                def(
                    "x",
                    Expr::tuple(vec![Value::var("y"), Value::int(3)]),
                    def(
                        "x",
                        Expr::tuple(vec![Value::int(2), Value::var("z")]),
                        Expr::var("y"),
                    ),
                ),
            ),
        ),
    );
    let program = Program::one(body).unwrap();

    assert_eq!(run(program), Expr::int(2));
}

#[test]
fn test_arithmetic_definition_with_consistent_assertion() {
    // one{∃x. x = add⟨3, 4⟩; x = 7; x} → 7
    let body = Expr::exists(
        Var::new("x"),
        def(
            "x",
            add(Value::int(3), Value::int(4)),
            def("x", Expr::int(7), Expr::var("x")),
        ),
    );
    let program = Program::one(body).unwrap();

    assert_eq!(run(program), Expr::int(7));
}

#[test]
fn test_failing_function_body_fails_the_program() {
    // one{∃f. f = λp. (∃x y. p = ⟨x, y⟩; ∃z. z = 69; ∃s. s = 5; fail);
    //     f(⟨1, 2⟩)} → fail
    let lambda_body = Expr::exists(
        Var::new("x"),
        Expr::exists(
            Var::new("y"),
            Expr::seq(
                Expr::eqn(
                    Value::var("p"),
                    Expr::tuple(vec![Value::var("x"), Value::var("y")]),
                ),
                Expr::exists(
                    Var::new("z"),
                    def(
                        "z",
                        Expr::int(69),
                        Expr::exists(Var::new("s"), def("s", Expr::int(5), Expr::Fail)),
                    ),
                ),
            ),
        ),
    );
    let body = Expr::exists(
        Var::new("f"),
        def(
            "f",
            Expr::lambda(Var::new("p"), lambda_body),
            Expr::app(
                Value::var("f"),
                Value::tuple(vec![Value::int(1), Value::int(2)]),
            ),
        ),
    );
    let program = Program::one(body).unwrap();

    assert_eq!(run(program), Expr::Fail);
}

/// `if (a > b) then t else e` in core form:
/// `∃w. w = one{(gt⟨a, b⟩; λd. t) ⊕ λd. e}; w(⟨⟩)`
fn if_gt(a: i64, b: i64, then_val: i64, else_val: i64) -> Expr {
    let guard = Expr::app(
        Value::op(PrimOp::Gt),
        Value::tuple(vec![Value::int(a), Value::int(b)]),
    );
    let chooser = Expr::one(Expr::choice(
        Expr::then(guard, Expr::lambda(Var::new("d"), Expr::int(then_val))),
        Expr::lambda(Var::new("d"), Expr::int(else_val)),
    ));
    Expr::exists(
        Var::new("w"),
        def(
            "w",
            chooser,
            Expr::app(Value::var("w"), Value::tuple(vec![])),
        ),
    )
}

#[test]
fn test_conditional_false_guard_takes_else() {
    // if(4 > 5): 6 else: 9 → 9
    let program = Program::one(if_gt(4, 5, 6, 9)).unwrap();

    assert_eq!(run(program), Expr::int(9));
}

#[test]
fn test_conditional_true_guard_takes_then() {
    // if(6 > 5): 6 else: 9 → 6
    let program = Program::one(if_gt(6, 5, 6, 9)).unwrap();

    assert_eq!(run(program), Expr::int(6));
}

#[test]
fn test_tuple_projections_compose() {
    // one{∃fst. fst = λp. (∃x y. p = ⟨x, y⟩; x);
    //     ∃snd. snd = λp. (∃x y. p = ⟨x, y⟩; y);
    //     ∃z. z = ⟨3, 4⟩;
    //     ∃a. a = fst(z); ∃b. b = snd(⟨5, 6⟩); add⟨a, b⟩} → 9
    let projection = |which: fn() -> Expr| {
        Expr::lambda(
            Var::new("p"),
            Expr::exists(
                Var::new("x"),
                Expr::exists(
                    Var::new("y"),
                    Expr::seq(
                        Expr::eqn(
                            Value::var("p"),
                            Expr::tuple(vec![Value::var("x"), Value::var("y")]),
                        ),
                        which(),
                    ),
                ),
            ),
        )
    };
    let fst = projection(|| Expr::var("x"));
    let snd = projection(|| Expr::var("y"));

    let body = Expr::exists(
        Var::new("fst"),
        def(
            "fst",
            fst,
            Expr::exists(
                Var::new("snd"),
                def(
                    "snd",
                    snd,
                    Expr::exists(
                        Var::new("z"),
                        def(
                            "z",
                            Expr::tuple(vec![Value::int(3), Value::int(4)]),
                            Expr::exists(
                                Var::new("a"),
                                def(
                                    "a",
                                    Expr::app(Value::var("fst"), Value::var("z")),
                                    Expr::exists(
                                        Var::new("b"),
                                        def(
                                            "b",
                                            Expr::app(
                                                Value::var("snd"),
                                                Value::tuple(vec![
                                                    Value::int(5),
                                                    Value::int(6),
                                                ]),
                                            ),
                                            add(Value::var("a"), Value::var("b")),
                                        ),
                                    ),
                                ),
                            ),
                        ),
                    ),
                ),
            ),
        ),
    );
    let program = Program::one(body).unwrap();

    assert_eq!(run(program), Expr::int(9));
}

#[test]
fn test_flat_map_over_tuple_via_all() {
    // one{∃fm. fm = λq. (∃f xs. q = ⟨f, xs⟩; all{∃i t. t = xs(i); f(t)});
    //     ∃g. g = λa. add⟨a, 1⟩;
    //     ∃ns. ns = ⟨1, 2, 3, 4, 5⟩;
    //     fm(⟨g, ns⟩)} → ⟨2, 3, 4, 5, 6⟩
    let mapper_body = Expr::exists(
        Var::new("f"),
        Expr::exists(
            Var::new("xs"),
            Expr::seq(
                Expr::eqn(
                    Value::var("q"),
                    Expr::tuple(vec![Value::var("f"), Value::var("xs")]),
                ),
                Expr::all(Expr::exists(
                    Var::new("i"),
                    Expr::exists(
                        Var::new("t"),
                        def(
                            "t",
                            Expr::app(Value::var("xs"), Value::var("i")),
                            Expr::app(Value::var("f"), Value::var("t")),
                        ),
                    ),
                )),
            ),
        ),
    );
    let numbers = Expr::tuple(vec![
        Value::int(1),
        Value::int(2),
        Value::int(3),
        Value::int(4),
        Value::int(5),
    ]);
    let body = Expr::exists(
        Var::new("fm"),
        def(
            "fm",
            Expr::lambda(Var::new("q"), mapper_body),
            Expr::exists(
                Var::new("g"),
                def(
                    "g",
                    Expr::lambda(Var::new("a"), add(Value::var("a"), Value::int(1))),
                    Expr::exists(
                        Var::new("ns"),
                        def(
                            "ns",
                            numbers,
                            Expr::app(
                                Value::var("fm"),
                                Value::tuple(vec![Value::var("g"), Value::var("ns")]),
                            ),
                        ),
                    ),
                ),
            ),
        ),
    );
    let program = Program::one(body).unwrap();

    assert_eq!(
        run(program),
        Expr::tuple(vec![
            Value::int(2),
            Value::int(3),
            Value::int(4),
            Value::int(5),
            Value::int(6),
        ])
    );
}

#[test]
fn test_choice_enumeration_under_all() {
    // all{∃x. x = 3; ∃y. y = (20 ⊕ 30); add⟨x, y⟩} → ⟨23, 33⟩
    let body = Expr::exists(
        Var::new("x"),
        def(
            "x",
            Expr::int(3),
            Expr::exists(
                Var::new("y"),
                def(
                    "y",
                    Expr::choice(Expr::int(20), Expr::int(30)),
                    add(Value::var("x"), Value::var("y")),
                ),
            ),
        ),
    );
    let program = Program::all(body).unwrap();

    assert_eq!(
        run(program),
        Expr::tuple(vec![Value::int(23), Value::int(33)])
    );
}

#[test]
fn test_first_solution_under_one() {
    // one{(1 ⊕ 2); add⟨3, 4⟩} → 7, and stuck results are values
    let body = Expr::then(
        Expr::choice(Expr::int(1), Expr::int(2)),
        add(Value::int(3), Value::int(4)),
    );
    let program = Program::one(body).unwrap();

    let result = run(program);
    assert_eq!(result, Expr::int(7));

    // Idempotence at the fixpoint: no rule matches the final term.
    let mut names = NameSupply::new();
    names.reserve_program(&result);
    let order = BinderOrder::of(&result);
    assert_eq!(rewrite_step(&result, &mut names, &order), None);
}

//! Generated block-structured programs against a scoped reference model.
//!
//! Each case renders a random tree of declarations, assignments, prints,
//! nested blocks, counted loops with `break`/`continue` and calls into a
//! fixed set of helper functions. The same tree is evaluated with a
//! map-per-scope model, and the VM must print the same lines and leave the
//! same module-level values. Any disagreement in slot offsets, truncation
//! or return shifts shows up as a wrong value or a runtime error.

use std::collections::{HashMap, HashSet};

use cimplc::check_source;
use proptest::prelude::*;

const NAMES: u8 = 4;

/// Helpers every generated program starts with. `twice` keeps a block
/// local alive across its return, `note` has an early void return, and
/// `tri` runs a `while` loop with `break` and `continue` inside a frame.
const PRELUDE: &str = "\
fn twice(n: int): int { d := n * 2; { e := d; } return d; }
fn note(n: int) { if n > 50 { println(n); return; } println(n + 1); }
fn tri(n: int): int {
t := 0; i := 0;
while true { i++; if i > n { break; } if i == 2 { continue; } t += i; }
return t;
}
";

#[derive(Clone, Debug)]
enum Gen {
    /// `v{name} := {value}` or `v{name} := {value} + v{other}`.
    Decl(u8, i64, Option<u8>),
    /// `v{name} += {value}`.
    Add(u8, i64),
    Print(u8),
    Twice(u8),
    Note(u8),
    Tri(u8),
    Block(Vec<Gen>),
    Loop(Loop),
}

#[derive(Clone, Debug)]
struct Loop {
    times: u8,
    brk: Option<u8>,
    skip: Option<u8>,
    /// Render as a counted `while` instead of a `for`.
    use_while: bool,
    body: Vec<Gen>,
}

/// A generated statement with every variable reference resolved: `None`
/// means the name was not visible and a literal `0` was rendered instead.
#[derive(Debug)]
enum Step {
    Decl(u8, i64, Option<u8>),
    Add(u8, i64),
    Print(Option<u8>),
    Twice(Option<u8>),
    Note(Option<u8>),
    Tri(Option<u8>),
    Block(Vec<Step>),
    Loop {
        times: u8,
        brk: Option<u8>,
        skip: Option<u8>,
        body: Vec<Step>,
    },
}

fn stmt() -> impl Strategy<Value = Gen> {
    let leaf = prop_oneof![
        (0..NAMES, 0i64..100, proptest::option::of(0..NAMES))
            .prop_map(|(name, value, other)| Gen::Decl(name, value, other)),
        (0..NAMES, 0i64..10).prop_map(|(name, value)| Gen::Add(name, value)),
        (0..NAMES).prop_map(Gen::Print),
        (0..NAMES).prop_map(Gen::Twice),
        (0..NAMES).prop_map(Gen::Note),
        (0..NAMES).prop_map(Gen::Tri),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Gen::Block),
            (
                0u8..4,
                proptest::option::of(0u8..4),
                proptest::option::of(0u8..4),
                any::<bool>(),
                proptest::collection::vec(inner, 0..4),
            )
                .prop_map(|(times, brk, skip, use_while, body)| {
                    Gen::Loop(Loop {
                        times,
                        brk,
                        skip,
                        use_while,
                        body,
                    })
                }),
        ]
    })
}

/// Renders statements to source, resolving each reference against the
/// names visible at that point.
struct Renderer {
    scopes: Vec<HashSet<u8>>,
    source: String,
}

impl Renderer {
    fn visible(&self, name: u8) -> Option<u8> {
        self.scopes
            .iter()
            .any(|scope| scope.contains(&name))
            .then_some(name)
    }

    fn operand(&self, name: u8) -> (Option<u8>, String) {
        match self.visible(name) {
            Some(name) => (Some(name), format!("v{name}")),
            None => (None, "0".to_owned()),
        }
    }

    fn scoped(&mut self, stmts: &[Gen]) -> Vec<Step> {
        self.scopes.push(HashSet::new());
        let steps = self.render(stmts);
        self.scopes.pop();
        steps
    }

    fn render(&mut self, stmts: &[Gen]) -> Vec<Step> {
        let mut steps = Vec::new();
        for stmt in stmts {
            let step = match stmt {
                Gen::Decl(name, value, other) => {
                    let other = other.and_then(|other| self.visible(other));
                    match other {
                        Some(other) => {
                            self.source
                                .push_str(&format!("v{name} := {value} + v{other};\n"));
                        }
                        None => self.source.push_str(&format!("v{name} := {value};\n")),
                    }
                    self.scopes.last_mut().unwrap().insert(*name);
                    Step::Decl(*name, *value, other)
                }
                Gen::Add(name, value) => {
                    if self.visible(*name).is_none() {
                        continue;
                    }
                    self.source.push_str(&format!("v{name} += {value};\n"));
                    Step::Add(*name, *value)
                }
                Gen::Print(name) => {
                    let (name, text) = self.operand(*name);
                    self.source.push_str(&format!("println({text});\n"));
                    Step::Print(name)
                }
                Gen::Twice(name) => {
                    let (name, text) = self.operand(*name);
                    self.source.push_str(&format!("println(twice({text}));\n"));
                    Step::Twice(name)
                }
                Gen::Note(name) => {
                    let (name, text) = self.operand(*name);
                    self.source.push_str(&format!("note({text});\n"));
                    Step::Note(name)
                }
                Gen::Tri(name) => {
                    let (name, text) = self.operand(*name);
                    self.source.push_str(&format!("println(tri({text} % 10));\n"));
                    Step::Tri(name)
                }
                Gen::Block(body) => {
                    self.source.push_str("{\n");
                    let body = self.scoped(body);
                    self.source.push_str("}\n");
                    Step::Block(body)
                }
                Gen::Loop(lp) => self.render_loop(lp),
            };
            steps.push(step);
        }
        steps
    }

    /// Both forms run the body for `k` in `0..times`; the `while` form
    /// counts from 1 because it increments before the exits.
    fn render_loop(&mut self, lp: &Loop) -> Step {
        let bias = u8::from(lp.use_while);
        if lp.use_while {
            self.source
                .push_str(&format!("{{\nk := 0;\nwhile k < {} {{\nk++;\n", lp.times));
        } else {
            self.source
                .push_str(&format!("for k := 0; k < {}; k++ {{\n", lp.times));
        }
        if let Some(brk) = lp.brk {
            self.source
                .push_str(&format!("if k == {} {{ break; }}\n", brk + bias));
        }
        if let Some(skip) = lp.skip {
            self.source
                .push_str(&format!("if k == {} {{ continue; }}\n", skip + bias));
        }
        let body = self.scoped(&lp.body);
        self.source
            .push_str(if lp.use_while { "}\n}\n" } else { "}\n" });
        Step::Loop {
            times: lp.times,
            brk: lp.brk,
            skip: lp.skip,
            body,
        }
    }
}

/// Evaluates resolved statements with one value map per scope.
struct Model {
    scopes: Vec<HashMap<u8, i64>>,
    output: String,
}

impl Model {
    fn value(&self, name: Option<u8>) -> i64 {
        name.and_then(|name| {
            self.scopes
                .iter()
                .rev()
                .find_map(|scope| scope.get(&name).copied())
        })
        .unwrap_or(0)
    }

    fn print(&mut self, value: i64) {
        self.output.push_str(&format!("{value}\n"));
    }

    fn scoped(&mut self, steps: &[Step]) {
        self.scopes.push(HashMap::new());
        self.run(steps);
        self.scopes.pop();
    }

    fn run(&mut self, steps: &[Step]) {
        for step in steps {
            match step {
                Step::Decl(name, value, other) => {
                    let result = value + self.value(*other);
                    self.scopes.last_mut().unwrap().entry(*name).or_insert(result);
                }
                Step::Add(name, value) => {
                    let slot = self
                        .scopes
                        .iter_mut()
                        .rev()
                        .find_map(|scope| scope.get_mut(name))
                        .unwrap();
                    *slot += value;
                }
                Step::Print(name) => self.print(self.value(*name)),
                Step::Twice(name) => self.print(self.value(*name) * 2),
                Step::Note(name) => {
                    let n = self.value(*name);
                    self.print(if n > 50 { n } else { n + 1 });
                }
                Step::Tri(name) => {
                    let n = self.value(*name) % 10;
                    self.print((1..=n).filter(|&i| i != 2).sum());
                }
                Step::Block(body) => self.scoped(body),
                Step::Loop {
                    times,
                    brk,
                    skip,
                    body,
                } => {
                    for k in 0..*times {
                        if *brk == Some(k) {
                            break;
                        }
                        if *skip == Some(k) {
                            continue;
                        }
                        self.scoped(body);
                    }
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn block_programs_match_model(program in proptest::collection::vec(stmt(), 0..12)) {
        let mut renderer = Renderer {
            scopes: vec![HashSet::new()],
            source: PRELUDE.to_owned(),
        };
        let steps = renderer.render(&program);
        let source = renderer.source;

        let mut model = Model {
            scopes: vec![HashMap::new()],
            output: String::new(),
        };
        model.run(&steps);

        let checked = check_source(&source);
        prop_assert!(checked.is_clean(), "{:?}\n{}", checked.diagnostics, source);

        let print = cimpl_vm::buffer_handler();
        let outcome = cimplc::run_source(&source, print.clone());
        prop_assert!(outcome.is_ok(), "{:?}\n{}", outcome, source);
        prop_assert_eq!(print.output(), model.output, "{}", source);

        let mut globals = outcome.unwrap().globals;
        globals.sort();
        let mut expected: Vec<(String, String)> = model.scopes[0]
            .iter()
            .map(|(name, value)| (format!("v{name}"), value.to_string()))
            .collect();
        expected.sort();
        prop_assert_eq!(globals, expected);
    }
}

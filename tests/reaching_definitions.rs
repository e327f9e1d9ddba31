use raptor_rd::analysis::fixed_point::Solver;
use raptor_rd::analysis::{reaching_definitions, DefinitionSet, Report};
use raptor_rd::error::ErrorKind;
use raptor_rd::ir;
use raptor_rd::{analyze, analyze_with, AnalysisConfig, UnsupportedPolicy};

/// A counting loop:
///
/// ```text
/// entry: declare i; declare s; i = 0; s = 0
/// cond:                       <- entry, latch
/// body:  s = i                <- cond
/// latch: i = t                <- body
/// exit:                       <- cond
/// ```
fn counting_loop() -> ir::ControlFlowGraph {
    let mut cfg = ir::ControlFlowGraph::new();
    let entry = cfg.insert_block(Some("entry"));
    let cond = cfg.insert_block(Some("cond"));
    let body = cfg.insert_block(Some("body"));
    let latch = cfg.insert_block(Some("latch"));
    let exit = cfg.insert_block(Some("exit"));

    {
        let block = cfg.block_mut(entry).unwrap();
        block.declare(ir::scalar("i"));
        block.declare(ir::scalar("s"));
        block.write(ir::scalar("i"), ir::const_(0));
        block.write(ir::scalar("s"), ir::const_(0));
    }
    cfg.block_mut(body)
        .unwrap()
        .write(ir::scalar("s"), ir::scalar("i"));
    cfg.block_mut(latch)
        .unwrap()
        .write(ir::scalar("i"), ir::scalar("t"));

    for &(head, tail) in &[
        (entry, cond),
        (cond, body),
        (body, latch),
        (latch, cond),
        (cond, exit),
    ] {
        cfg.insert_edge(ir::Edge::new(head, tail)).unwrap();
    }

    cfg
}

fn out_sets(cfg: &ir::ControlFlowGraph, config: &AnalysisConfig) -> Vec<DefinitionSet> {
    let rd = reaching_definitions(cfg, config).unwrap();
    cfg.blocks()
        .map(|block| rd.block_sets(block.index()).unwrap().out_set().clone())
        .collect()
}

#[test]
fn counting_loop_report() {
    let cfg = counting_loop();
    let report = analyze(&cfg).unwrap();

    assert_eq!(
        report.to_string(),
        "entry: (i=0) (s=0)\n\
         cond: (i=0) (i=t) (s=0) (s=i)\n\
         body: (i=0) (i=t) (s=i)\n\
         latch: (i=t) (s=i)\n\
         exit: (i=0) (i=t) (s=0) (s=i)\n"
    );

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    assert_eq!(rd.passes(), 3);
    assert_eq!(rd.catalog().len(), 6);
}

#[test]
fn shadowing_within_a_block() {
    let mut cfg = ir::ControlFlowGraph::new();
    let only = cfg.insert_block(Some("only"));
    cfg.block_mut(only)
        .unwrap()
        .write(ir::scalar("x"), ir::const_(1));
    let second = cfg
        .block_mut(only)
        .unwrap()
        .write(ir::scalar("x"), ir::const_(2));

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    let gen = rd.block_sets(only).unwrap().gen();
    let x2 = rd.catalog().id(&ir::Site::new(only, second)).unwrap();

    assert_eq!(gen.iter().collect::<Vec<_>>(), vec![x2]);
    assert_eq!(analyze(&cfg).unwrap().to_string(), "only: (x=2)\n");
}

#[test]
fn merge_is_a_union() {
    let mut cfg = ir::ControlFlowGraph::new();
    let a = cfg.insert_block(Some("a"));
    let b = cfg.insert_block(Some("b"));
    let c = cfg.insert_block(Some("c"));
    let d1 = cfg
        .block_mut(a)
        .unwrap()
        .write(ir::scalar("x"), ir::const_(1));
    let d2 = cfg
        .block_mut(b)
        .unwrap()
        .write(ir::scalar("y"), ir::const_(2));
    cfg.insert_edge(ir::Edge::new(a, c)).unwrap();
    cfg.insert_edge(ir::Edge::new(b, c)).unwrap();

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    let d1 = rd.catalog().id(&ir::Site::new(a, d1)).unwrap();
    let d2 = rd.catalog().id(&ir::Site::new(b, d2)).unwrap();

    let expected: DefinitionSet = vec![d1, d2].into_iter().collect();
    assert_eq!(rd.block_sets(c).unwrap().in_set(), &expected);
}

#[test]
fn definition_reaches_across_back_edge() {
    let mut cfg = ir::ControlFlowGraph::new();
    let outside = cfg.insert_block(Some("outside"));
    let header = cfg.insert_block(Some("header"));
    let body = cfg.insert_block(Some("body"));
    let write = cfg
        .block_mut(body)
        .unwrap()
        .write(ir::scalar("x"), ir::const_(5));
    cfg.insert_edge(ir::Edge::new(outside, header)).unwrap();
    cfg.insert_edge(ir::Edge::new(header, body)).unwrap();
    cfg.insert_edge(ir::Edge::new(body, header)).unwrap();

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    let write = rd.catalog().id(&ir::Site::new(body, write)).unwrap();

    assert!(rd.block_sets(header).unwrap().in_set().contains(write));
}

#[test]
fn entry_out_equals_entry_gen() {
    let mut cfg = counting_loop();
    // Give the entry block a predecessor; it must still be treated as having
    // none.
    cfg.insert_edge(ir::Edge::new(3, 0)).unwrap();

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    let entry = rd.block_sets(0).unwrap();
    assert_eq!(entry.out_set(), entry.gen());
    assert!(entry.in_set().is_empty());
}

fn snapshot(cfg: &ir::ControlFlowGraph, solver: &Solver) -> Vec<DefinitionSet> {
    cfg.blocks()
        .map(|block| solver.block_sets(block.index()).unwrap().out_set().clone())
        .collect()
}

#[test]
fn out_sets_grow_until_stable() {
    let cfg = counting_loop();
    let mut solver = Solver::new(&cfg, &AnalysisConfig::default()).unwrap();

    let mut previous = snapshot(&cfg, &solver);
    while solver.pass().unwrap() {
        let current = snapshot(&cfg, &solver);
        for (before, after) in previous.iter().zip(current.iter()) {
            assert!(before <= after);
        }
        previous = current;
    }

    assert!(!solver.pass().unwrap());
    assert_eq!(snapshot(&cfg, &solver), previous);
}

#[test]
fn self_kill_is_neutral() {
    let cfg = counting_loop();
    let with_self_kill = out_sets(&cfg, &AnalysisConfig::default());
    let without_self_kill = out_sets(
        &cfg,
        &AnalysisConfig::default().with_exclude_self_kill(true),
    );
    assert_eq!(with_self_kill, without_self_kill);

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    let body = rd.block_sets(2).unwrap();
    assert!(body.gen().is_subset(body.kill()));
}

#[test]
fn identical_renderings_collapse() {
    let mut cfg = ir::ControlFlowGraph::new();
    let left = cfg.insert_block(Some("left"));
    let right = cfg.insert_block(Some("right"));
    let join = cfg.insert_block(Some("join"));
    cfg.block_mut(left)
        .unwrap()
        .write(ir::scalar("y"), ir::const_(3));
    cfg.block_mut(right)
        .unwrap()
        .write(ir::scalar("y"), ir::const_(3));
    cfg.block_mut(join)
        .unwrap()
        .write(ir::scalar("b"), ir::scalar("y"));
    cfg.insert_edge(ir::Edge::new(left, join)).unwrap();
    cfg.insert_edge(ir::Edge::new(right, join)).unwrap();

    let report = analyze(&cfg).unwrap();
    let join = report.block("join").unwrap();
    assert_eq!(join.definitions(), &["(b=y)".to_string(), "(y=3)".to_string()]);

    let mut sorted = join.definitions().to_vec();
    sorted.sort();
    assert_eq!(join.definitions(), sorted.as_slice());
}

#[test]
fn constants_render_as_integers() {
    let mut cfg = ir::ControlFlowGraph::new();
    let entry = cfg.insert_block(Some("entry"));
    cfg.block_mut(entry)
        .unwrap()
        .write(ir::const_(4096), ir::const_(-1));
    cfg.block_mut(entry).unwrap().declare(ir::scalar("p"));

    assert_eq!(analyze(&cfg).unwrap().to_string(), "entry: (4096=-1) (p=0)\n");
}

#[test]
fn unsupported_instructions() {
    let mut cfg = counting_loop();
    cfg.block_mut(2).unwrap().unsupported("load");

    let err = analyze(&cfg).unwrap_err();
    match err.kind() {
        ErrorKind::UnsupportedInstructionKind(2, _, opcode) => assert_eq!(opcode, "load"),
        kind => panic!("unexpected error {:?}", kind),
    }

    let config =
        AnalysisConfig::default().with_unsupported_instructions(UnsupportedPolicy::Ignore);
    assert_eq!(
        analyze_with(&cfg, &config).unwrap(),
        analyze(&counting_loop()).unwrap()
    );
}

#[test]
fn empty_graph() {
    let cfg = ir::ControlFlowGraph::new();
    let report = analyze(&cfg).unwrap();
    assert!(report.blocks().is_empty());
    assert_eq!(report.to_string(), "");
}

#[test]
fn deserialized_graph() {
    let cfg: ir::ControlFlowGraph = serde_json::from_str(
        r#"{
            "blocks": [
                {
                    "index": 0,
                    "label": "entry",
                    "instructions": [
                        { "index": 0, "operation": { "Declare": { "dst": { "name": "x" } } } },
                        { "index": 1, "operation": { "Write": {
                            "dst": { "Scalar": { "name": "y" } },
                            "src": { "Constant": { "value": 7 } }
                        } } }
                    ]
                },
                {
                    "index": 1,
                    "label": "then",
                    "instructions": [
                        { "index": 0, "operation": { "Write": {
                            "dst": { "Scalar": { "name": "x" } },
                            "src": { "Scalar": { "name": "y" } }
                        } } }
                    ]
                },
                { "index": 2, "label": "done" }
            ],
            "edges": [
                { "head": 0, "tail": 1 },
                { "head": 0, "tail": 2 },
                { "head": 1, "tail": 2 }
            ]
        }"#,
    )
    .unwrap();

    let rd = reaching_definitions(&cfg, &AnalysisConfig::default()).unwrap();
    let report = Report::out_sets(&cfg, &rd).unwrap();
    assert_eq!(
        report.to_string(),
        "entry: (x=0) (y=7)\nthen: (x=y) (y=7)\ndone: (x=0) (x=y) (y=7)\n"
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["blocks"][2]["identifier"], "done");
    assert_eq!(json["blocks"][2]["definitions"][1], "(x=y)");
}

#[test]
fn malformed_graph_is_rejected() {
    let err = serde_json::from_str::<ir::ControlFlowGraph>(
        r#"{
            "blocks": [{ "index": 0 }, { "index": 1 }],
            "edges": [{ "head": 0, "tail": 1 }, { "head": 5, "tail": 1 }]
        }"#,
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("Malformed control flow graph"));

    let mut cfg = ir::ControlFlowGraph::new();
    let entry = cfg.insert_block(Some("entry"));
    let err = cfg.insert_edge(ir::Edge::new(entry, 5)).unwrap_err();
    match err.kind() {
        ErrorKind::MalformedControlFlowGraph(_) => {}
        kind => panic!("unexpected error {:?}", kind),
    }
}

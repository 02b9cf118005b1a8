use std::sync::Arc;
use treecat::{Node, Tree, TreeError, TreeParseError, parse_newick, write_newick};

fn names_in_preorder(tree: &Tree) -> Vec<String> {
    tree.node_ids_all()
        .iter()
        .map(|id| tree.name(id).map(|n| n.to_string()).unwrap_or_default())
        .collect()
}

fn tip_names(tree: &Tree) -> Vec<String> {
    tree.node_ids_all()
        .iter()
        .filter(|id| tree.child_ids(id).is_empty())
        .filter_map(|id| tree.name(id).map(|n| n.to_string()))
        .collect()
}

fn named_node(name: &str, branch_length: Option<f64>) -> Node {
    let mut node = Node::default();
    node.set_name(Some(Arc::from(name)));
    node.set_branch_length(branch_length);
    node
}

/// `((((A,B1),B2),B3)...,Bn);`
fn caterpillar(depth: usize) -> String {
    let mut newick = "(".repeat(depth);
    newick.push('A');
    for i in 1..=depth {
        newick.push_str(&format!(",B{i})"));
    }
    newick.push(';');
    newick
}

#[test]
fn test_standard_format_compliance() {
    let test_cases = vec![
        // (name, newick, tips, total nodes)
        ("Empty nodes", "(,,(,));", 4, 6),
        ("Leaf names only", "(A,B,(C,D));", 4, 6),
        ("All nodes named", "(A,B,(C,D)E)F;", 4, 6),
        ("Branch lengths only", "(:0.1,:0.2,(:0.3,:0.4):0.5);", 4, 6),
        ("Names and branch lengths", "(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);", 4, 6),
        ("Rooted binary", "(A,(B,C));", 3, 5),
        ("Single node", "A;", 1, 1),
        ("Single child", "((A))B;", 1, 3),
        ("Multifurcating tree", "(A,B,C,D);", 4, 5),
    ];

    for (name, newick_str, expected_tips, expected_total_nodes) in test_cases {
        let tree = parse_newick(newick_str)
            .unwrap_or_else(|err| panic!("Failed to parse tree {name}: {err}"));

        let tips = tree
            .node_ids_all()
            .iter()
            .filter(|id| tree.child_ids(id).is_empty())
            .count();
        assert_eq!(tips, expected_tips, "Wrong tip count for {name}");
        assert_eq!(
            tree.node_count(),
            expected_total_nodes,
            "Wrong total node count for {name}"
        );
        assert_eq!(write_newick(&tree), newick_str, "Round trip changed {name}");
    }
}

#[test]
fn test_preorder_traversal() {
    let tree = parse_newick("((A,B)C,D)E;").unwrap();
    assert_eq!(names_in_preorder(&tree), vec!["E", "C", "A", "B", "D"]);

    let first = tree.first_node_id().unwrap();
    assert_eq!(tree.child_ids(&first).len(), 2);
    assert_eq!(tree.node(Some(first)).unwrap().parent_id(), None);
    assert_eq!(tip_names(&tree), vec!["A", "B", "D"]);
}

#[test]
fn test_deeply_nested_tree() {
    let newick = caterpillar(100_000);
    let tree = parse_newick(&newick).expect("deep caterpillar should parse");
    assert_eq!(tree.node_count(), 2 * 100_000 + 1);
    assert_eq!(tree.node_ids_all().len(), tree.node_count());
    assert_eq!(write_newick(&tree), newick);
}

#[test]
fn test_branch_length_formatting() {
    let test_cases = vec![
        // (input, expected output)
        ("(A:1e-300,B:0.5);", "(A:1e-300,B:0.5);"),
        ("(A:2.5E-7,B:1e20);", "(A:2.5e-7,B:1e20);"),
        ("(A:0.0001,B:123456.5);", "(A:0.0001,B:123456.5);"),
        ("(A:0,B:-0.25);", "(A:0,B:-0.25);"),
    ];

    for (input, expected) in test_cases {
        let tree = parse_newick(input).unwrap();
        assert_eq!(write_newick(&tree), expected, "Wrong output for {input}");
    }
}

#[test]
fn test_quotes_inside_comments_are_ignored() {
    let test_cases = vec![
        ("(A[&note=it's],B);", "(A,B);"),
        ("(A[&note=\"x],B)[y\"];", "(A,B);"),
        ("(A[&range=(0,1],B);", "(A,B);"),
    ];

    for (input, expected) in test_cases {
        let tree = parse_newick(input)
            .unwrap_or_else(|err| panic!("Failed to parse {input}: {err}"));
        assert_eq!(write_newick(&tree), expected, "Wrong output for {input}");
    }

    // Brackets inside a quoted label are part of the label.
    let tree = parse_newick("('A[x',B);").unwrap();
    assert_eq!(write_newick(&tree), "('A[x',B);");
}

#[test]
fn test_quoted_labels() {
    let tree = parse_newick("('Homo sapiens','can''t',\"Pan\");").unwrap();
    assert_eq!(names_in_preorder(&tree), vec!["", "Homo sapiens", "can't", "Pan"]);
    assert_eq!(write_newick(&tree), "('Homo sapiens','can''t',Pan);");
}

#[test]
fn test_comments_and_whitespace_are_dropped() {
    let tree =
        parse_newick("[&R] ((A:1, B:2)[&support=0.9]:0.5 ,C:3.0);").unwrap();
    assert_eq!(write_newick(&tree), "((A:1,B:2):0.5,C:3);");
}

#[test]
fn test_root_branch_length_is_dropped() {
    let tree = parse_newick("(A:0.1,B:0.2):0.5;").unwrap();
    let first = tree.first_node_id().unwrap();
    assert_eq!(tree.branch_length(&first), None);
    assert_eq!(write_newick(&tree), "(A:0.1,B:0.2);");
}

#[test]
fn test_invalid_newick() {
    assert!(matches!(parse_newick("(A,B,C)"), Err(TreeParseError::InvalidNewick)));
    assert!(matches!(parse_newick(";"), Err(TreeParseError::InvalidNewick)));
    assert!(matches!(parse_newick("((A,B);"), Err(TreeParseError::InvalidNewick)));
    assert!(matches!(parse_newick("(A)B)(;"), Err(TreeParseError::InvalidNewick)));
    assert!(matches!(parse_newick("('A,B);"), Err(TreeParseError::InvalidNewick)));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        parse_newick("(A:x,B);"),
        Err(TreeParseError::InvalidBranchLength(raw)) if raw == "x"
    ));
    assert!(matches!(
        parse_newick("(A,B);(C,D);"),
        Err(TreeParseError::UnexpectedCharacter { character: '(', .. })
    ));
    assert!(matches!(
        parse_newick("(A B,C);"),
        Err(TreeParseError::UnexpectedCharacter { character: 'B', .. })
    ));
}

#[test]
fn test_tree_built_by_hand() {
    let mut tree = Tree::default();
    let root_id = tree.add_node(named_node("root", None), None).ok();
    let _ = tree.add_node(named_node("tip_1", Some(0.5)), root_id).ok();
    let node_2_id = tree.add_node(named_node("node_2", Some(0.5)), root_id).ok();
    let _ = tree.add_node(named_node("tip_2", Some(0.5)), node_2_id).ok();
    let _ = tree.add_node(named_node("tip_3", Some(0.5)), node_2_id).ok();

    assert_eq!(tree.validate().ok(), root_id);
    assert_eq!(tree.node_count(), 5);
    assert_eq!(tip_names(&tree), vec!["tip_1", "tip_2", "tip_3"]);
    assert_eq!(
        write_newick(&tree),
        "(tip_1:0.5,(tip_2:0.5,tip_3:0.5)node_2:0.5)root;"
    );
}

#[test]
fn test_validation_requires_single_first_node() {
    let mut tree = Tree::default();
    let _ = tree.add_node(named_node("A", None), None);
    let _ = tree.add_node(named_node("B", None), None);
    assert!(matches!(tree.validate(), Err(TreeError::InvalidTree(_))));

    let mut empty = Tree::default();
    assert!(empty.validate().is_err());
    assert_eq!(write_newick(&empty), "");
}

#[test]
fn test_rename_nodes() {
    let mut tree = parse_newick("((1,2)3,4);").unwrap();
    let renamed = tree.rename_nodes(|name| match name {
        "1" | "3" => Some(format!("n{name}").into()),
        _ => None,
    });
    assert_eq!(renamed, 2);
    assert_eq!(write_newick(&tree), "((n1,2)n3,4);");
}

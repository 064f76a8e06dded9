use indoc::indoc;

use super::*;

#[test]
fn child_keys_keep_insertion_order() {
    let mut tree = KeyTree::new();
    tree.set_string("a.zeta", "1");
    tree.set_string("a.alpha", "2");
    tree.set_string("a.mid.x", "3");
    tree.set_string("a.zeta", "overwritten");

    assert_eq!(tree.child_keys("a"), ["zeta", "alpha", "mid"]);
    assert_eq!(tree.get_string("a.zeta").unwrap(), "overwritten");
    assert!(tree.child_keys("missing.path").is_empty());
}

#[test]
fn typed_getters_report_missing_and_mismatched_keys() {
    let mut tree = KeyTree::new();
    tree.set_int("a.count", 7);
    tree.set_float("a.ratio", 0.5);

    assert_eq!(tree.get_int("a.count").unwrap(), 7);
    assert_eq!(tree.get_float("a.ratio").unwrap(), 0.5);

    assert!(matches!(
        tree.get_string("a.count"),
        Err(ContainerError::WrongType {
            expected: ValueKind::String,
            found: ValueKind::Integer,
            ..
        })
    ));
    assert!(matches!(
        tree.get_int("a.ratio"),
        Err(ContainerError::WrongType {
            expected: ValueKind::Integer,
            found: ValueKind::Float,
            ..
        })
    ));
    assert!(matches!(
        tree.get_string("a.nothing"),
        Err(ContainerError::MissingKey { path }) if path == "a.nothing"
    ));
}

#[test]
fn contains_sees_values_and_branches() {
    let mut tree = KeyTree::new();
    tree.set_string("a.b.c", "x");

    assert!(tree.contains("a"));
    assert!(tree.contains("a.b"));
    assert!(tree.contains("a.b.c"));
    assert!(!tree.contains("a.c"));
}

#[test]
fn remove_drops_values_and_branches() {
    let mut tree = KeyTree::new();
    tree.set_string("a.b.c", "deep");
    tree.set_int("a.b", 1);
    tree.set_string("a.d", "sibling");
    tree.set_string("top", "root level");

    tree.remove("a.b");
    assert!(!tree.contains("a.b"));
    assert!(!tree.contains("a.b.c"));
    assert_eq!(tree.child_keys("a"), ["d"]);

    tree.remove("top");
    tree.remove("not.there");
    assert_eq!(tree.child_keys(""), ["a"]);
}

#[test]
fn prints_indented_text() {
    let mut tree = KeyTree::new();
    tree.set_string("OILCan.version", "0.2.0");
    tree.set_string("module.name", "say \"hi\"\n");
    tree.set_int("module.count", -3);
    tree.set_float("module.ratio", 2.0);
    tree.set_float("module.tiny", 1e-7);

    assert_eq!(
        tree.to_string(),
        indoc! {r#"
            OILCan:
              version: "0.2.0"
            module:
              name: "say \"hi\"\n"
              count: -3
              ratio: 2.0
              tiny: 1e-7
        "#}
    );
}

#[test]
fn parses_what_it_prints() {
    let text = indoc! {r#"
        # comment lines and blank lines are skipped

        module:
          name: "m"
          funcs:
            f0:
              body: "empty"
              weight: 1.5
              flag: 1
    "#};

    let tree = KeyTree::parse(text).unwrap();

    assert_eq!(tree.get_string("module.name").unwrap(), "m");
    assert_eq!(tree.get_string("module.funcs.f0.body").unwrap(), "empty");
    assert_eq!(tree.get_float("module.funcs.f0.weight").unwrap(), 1.5);
    assert_eq!(tree.get_int("module.funcs.f0.flag").unwrap(), 1);
    assert_eq!(tree.child_keys("module"), ["name", "funcs"]);

    let reparsed: KeyTree = tree.to_string().parse().unwrap();
    assert_eq!(reparsed, tree);
}

#[test]
fn special_floats_survive_text() {
    let mut tree = KeyTree::new();
    tree.set_float("x.inf", f64::INFINITY);
    tree.set_float("x.neg", -0.25);
    tree.set_float("x.big", 1e300);

    let reparsed = KeyTree::parse(&tree.to_string()).unwrap();

    assert_eq!(reparsed.get_float("x.inf").unwrap(), f64::INFINITY);
    assert_eq!(reparsed.get_float("x.neg").unwrap(), -0.25);
    assert_eq!(reparsed.get_float("x.big").unwrap(), 1e300);
}

#[test]
fn syntax_errors_carry_line_numbers() {
    let bad_indent = "a:\n   b: 1\n";
    assert!(matches!(
        KeyTree::parse(bad_indent),
        Err(ContainerError::Syntax { line: 2, .. })
    ));

    let too_deep = "a:\n    b: 1\n";
    assert!(matches!(
        KeyTree::parse(too_deep),
        Err(ContainerError::Syntax { line: 2, .. })
    ));

    let unterminated = "a:\n  b: \"open\n";
    assert!(matches!(
        KeyTree::parse(unterminated),
        Err(ContainerError::Syntax { line: 2, .. })
    ));

    let no_colon = "a:\n  b\n";
    assert!(matches!(
        KeyTree::parse(no_colon),
        Err(ContainerError::Syntax { line: 2, .. })
    ));

    let garbage_value = "a: 12abc\n";
    assert!(matches!(
        KeyTree::parse(garbage_value),
        Err(ContainerError::Syntax { line: 1, .. })
    ));
}

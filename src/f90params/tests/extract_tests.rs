// f90params/tests/extract_tests.rs

//! Extraction of a realistic parameter-reading module.

use f90params::scanner::{scan, Scanner, TokenType};
use f90params::{extract, read_file, AssignRange, Dimension, Error, TypeKind, Value};

const FIXTURE: &str = "tests/fixtures/readpar.f90";

#[test]
fn test_fixture_namelists() {
    let extraction = read_file(FIXTURE).unwrap();
    assert!(!extraction.has_error(), "{:?}", extraction.diagnostics);

    let names: Vec<_> = extraction.namelists.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["discretization", "time", "output", "sources"]);
    assert_eq!(extraction.namelists[3].subroutine(), "read_sources");
}

#[test]
fn test_fixture_values() {
    let extraction = read_file(FIXTURE).unwrap();

    let discretization = extraction.get("discretization").unwrap();
    // The loop body assignment comes later and does not override
    assert_eq!(discretization.get("order").unwrap().values(), &[Value::Integer(4)]);
    assert_eq!(
        discretization.get("flux").unwrap().formatted_values(),
        vec!["'godunov'"]
    );

    let time = extraction.get("time").unwrap();
    assert_eq!(time.get("end_time").unwrap().formatted_values(), vec!["10.0"]);
    assert_eq!(time.get("dt").unwrap().values(), &[Value::Real(0.5e-3)]);
    assert_eq!(
        time.get("checkpoints").unwrap().formatted_values(),
        vec!["1", "10", "10", "1"]
    );

    let output = extraction.get("output").unwrap();
    assert_eq!(
        output.get("gravity").unwrap().formatted_values(),
        vec!["0.0", "0.0", "-9.81"]
    );
    let receivers = output.get("receivers").unwrap();
    assert_eq!(
        receivers.define().unwrap().ty().dimension(),
        Some(Dimension::Runtime)
    );
    assert!(!receivers.has_values());
    assert_eq!(output.missing_defaults().count(), 1);

    let sources = extraction.get("sources").unwrap();
    let nsources = sources.get("nsources").unwrap();
    assert_eq!(nsources.define().unwrap().ty().kind(), TypeKind::Integer);
    assert_eq!(nsources.formatted_values(), vec!["1"]);
    assert_eq!(sources.get("source_file").unwrap().formatted_values(), vec!["''"]);
}

#[test]
fn test_fixture_annotations_and_warnings() {
    let extraction = read_file(FIXTURE).unwrap();

    let order = extraction
        .get("discretization")
        .and_then(|n| n.get("order"))
        .and_then(|p| p.define())
        .unwrap();
    let rendered: Vec<_> = order.annotations().iter().map(|a| a.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "brief: Convergence order of the scheme",
            "Values above 6 are not supported",
            "range: 1 <= order <= 6",
        ]
    );

    // Every name on a definition line shares the annotations above it
    let dt = extraction.get("time").and_then(|n| n.get("dt")).unwrap();
    assert_eq!(dt.define().unwrap().annotations()[0].to_string(), "unit: s");

    assert!(extraction
        .diagnostics
        .iter()
        .any(|d| d.message == "Converting real expression to integer type for 'nsources'"));
}

#[test]
fn test_namelist_count_matches_resolvable_statements() {
    let source = "\
module m
contains
subroutine a()
  integer :: x, y
  namelist /one/ x
  namelist /two/ x, y
  namelist /three/
end subroutine a
subroutine b()
  real :: z
  namelist /four/ z
end subroutine b
end module m
";
    let extraction = extract(source).unwrap();
    assert_eq!(extraction.namelists.len(), 3);
    assert!(extraction.syntax_error);
    assert!(!extraction.lexical_error);
}

#[test]
fn test_end_merge_push_back() {
    let types: Vec<_> = scan("end module\nend subroutine\nend namelist")
        .into_iter()
        .map(|t| t.token_type)
        .collect();
    assert_eq!(
        types,
        vec![
            TokenType::EndModule,
            TokenType::EndLine,
            TokenType::EndSubroutine,
            TokenType::EndLine,
            TokenType::End,
            TokenType::Namelist,
        ]
    );

    let mut scanner = Scanner::new("end namelist");
    assert_eq!(scanner.next_token().map(|t| t.token_type), Some(TokenType::End));
    assert!(scanner.state().pending.is_some());
    let pushed_back = scanner.next_token().unwrap();
    assert_eq!(pushed_back.token_type, TokenType::Namelist);
    assert_eq!(pushed_back.lexeme(), "namelist");
    assert_eq!(pushed_back.column, 5);
    assert!(scanner.next_token().is_none());
}

#[test]
fn test_first_writer_wins() {
    let ranges = [
        AssignRange {
            value: Value::Integer(5),
            start: 0,
            end: Some(3),
        },
        AssignRange {
            value: Value::Integer(9),
            start: 1,
            end: Some(2),
        },
    ];
    assert_eq!(f90params::namelist::reconcile(3, &ranges), vec![Value::Integer(5); 3]);
}

#[test]
fn test_partial_range_definition() {
    let source = "\
module m
subroutine s()
  real :: w(2:4)
  namelist /n/ w
  w(2:4) = 1
end subroutine s
end module m
";
    let extraction = extract(source).unwrap();
    let w = extraction.get("n").and_then(|n| n.get("w")).unwrap();
    assert_eq!(w.define().unwrap().size(), 3);

    let range = &w.assigns().unwrap()[0];
    assert_eq!((range.start, range.end), (1, Some(4)));
    assert!(extraction
        .diagnostics
        .iter()
        .any(|d| d.message.starts_with("Define range not starting from 1")));
}

#[test]
fn test_define_after_namelist_is_fatal() {
    let source = "\
module m
subroutine s()
  integer :: a
  namelist /n/ a
  real :: b
end subroutine s
end module m
";
    let err = extract(source).unwrap_err();
    assert!(matches!(err, Error::DefineAfterNamelist { line: 5, .. }));
    assert_eq!(err.category(), "ordering");
}

#[test]
fn test_unresolved_parameter_names_namelist() {
    let source = "\
module m
subroutine s()
  integer :: a
  namelist /n/ a, ghost
end subroutine s
end module m
";
    let err = extract(source).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'ghost'"));
    assert!(message.contains("'n'"));
}

#[test]
fn test_annotation_block_round_trip() {
    let source = "!> @brief Order\n!! more text\n\ninteger :: order\n";
    let types: Vec<_> = scan(source).into_iter().map(|t| t.token_type).collect();
    assert_eq!(
        types,
        vec![
            TokenType::AnnotationKeyword,
            TokenType::AnnotationText,
            TokenType::EndLine,
            TokenType::AnnotationText,
            TokenType::EndLine,
            TokenType::Integer,
            TokenType::DoubleColon,
            TokenType::Identifier,
            TokenType::EndLine,
        ]
    );
}

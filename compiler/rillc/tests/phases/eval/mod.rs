//! Whole programs executed through the driver.

use pretty_assertions::assert_eq;
use rill_diagnostic::ErrorCode;
use rill_ir::Value;
use rillc::RunOptions;

use crate::common::{render, run_err, run_printed, run_with};

#[test]
fn fizzbuzz() {
    let printed = run_printed(
        "for (int i = 1; i <= 15; i++) {
             if (i % 15 == 0) { print(\"FizzBuzz\"); }
             else if (i % 3 == 0) { print(\"Fizz\"); }
             else if (i % 5 == 0) { print(\"Buzz\"); }
             else { print(i); }
         }",
    );
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[2], "Fizz");
    assert_eq!(lines[4], "Buzz");
    assert_eq!(lines[14], "FizzBuzz");
}

#[test]
fn lists_and_foreach() {
    let printed = run_printed(
        "List<int> xs = new List<int>() { 3, 1, 4 };
         xs.Add(1);
         long sum = 0;
         foreach (long v in xs) { sum += v; }
         print(sum);
         print(xs.Count);
         print(xs.Contains(4));
         print(xs);",
    );
    assert_eq!(printed, "9\n4\nTrue\n[3, 1, 4, 1]\n");
}

#[test]
fn switch_dispatch() {
    let printed = run_printed(
        "string name(int d) {
             switch (d) {
                 case 0: return \"zero\";
                 case 1:
                 case 2: return \"small\";
                 default: return \"big\";
             }
         }
         print(name(0)); print(name(2)); print(name(9));",
    );
    assert_eq!(printed, "zero\nsmall\nbig\n");
}

#[test]
fn numeric_coercion_in_compound_assignment() {
    let printed = run_printed(
        "int x = 5; x += (byte)3; print(x);
         float f = 2.0f; f ^= 3; print(f);
         bool a = true; bool b = false; a ^= b; print(a);
         long big = int.MaxValue; big += 1; print(big);",
    );
    assert_eq!(printed, "8\n8\nTrue\n2147483648\n");
}

#[test]
fn called_function_result_is_shown() {
    let output = run_with(
        "int answer() { return 6 * 7; }",
        &RunOptions {
            call: Some("answer".to_string()),
            ..RunOptions::default()
        },
    )
    .unwrap();
    assert_eq!(output.result, Some(Value::Int(42)));
    assert_eq!(output.printed, "");
}

#[test]
fn runtime_errors_point_at_the_failing_line() {
    let source = "int z = 0;\nint one = 1;\nint r = one / z;";
    let diagnostic = run_err(source);
    assert_eq!(diagnostic.code, ErrorCode::E6001);
    let rendered = render(&diagnostic, source);
    assert!(rendered.contains("--> test.rill:3:"), "{rendered}");
}

#[test]
fn recursion_limit_reports_the_call_chain() {
    let diagnostic = run_with(
        "int spin(int n) { return spin(n + 1); } int r = spin(0);",
        &RunOptions {
            max_depth: 8,
            ..RunOptions::default()
        },
    )
    .err()
    .expect("recursion should hit the limit");
    assert_eq!(diagnostic.code, ErrorCode::E6031);
    assert_eq!(diagnostic.notes.len(), 8);
    assert_eq!(diagnostic.notes[0], "in function `spin`");
}

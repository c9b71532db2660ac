#[test]
fn record_model_derive_ui() {
    let testcases = trybuild::TestCases::new();
    testcases.pass("tests/ui/record_model/pass.rs");
}

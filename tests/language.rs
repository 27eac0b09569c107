use std::{fs, sync::Arc};

use tally::{Engine, rates::cache::RateCache};
use walkdir::WalkDir;

/// Separates a sheet line from the output it must produce.
const EXPECT: &str = " => ";

#[test]
fn sheets_produce_their_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/sheets").into_iter()
                                    .filter_map(Result::ok)
                                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "tally"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        run_sheet(&path.display().to_string(), &content);
    }

    assert!(count > 0, "No sheets found in tests/sheets");
}

/// Evaluates every line of a sheet on a fresh engine without rates.
///
/// A line written `input => output` must display `output`. Any other line
/// must produce nothing.
fn run_sheet(name: &str, content: &str) {
    let engine = Engine::with_rate_cache(Arc::new(RateCache::empty()));

    for (number, line) in content.lines().enumerate() {
        let (input, expected) = line.rsplit_once(EXPECT).unwrap_or((line, ""));
        let actual = engine.eval(input).to_string();

        assert_eq!(actual,
                   expected,
                   "{name}:{}: `{input}` gave `{actual}` instead of `{expected}`",
                   number + 1);
    }
}

#[test]
fn running_the_same_sheet_twice_gives_the_same_output() {
    let sheet = "price = $80\nprice * 25%\n+ 5\nin USD";

    let first = Engine::new().eval_lines(sheet);
    let second = Engine::new().eval_lines(sheet);
    assert_eq!(first, second);
    assert_eq!(first.last().map(ToString::to_string).as_deref(), Some("$25.00"));
}

//! Exclusion tests
//!
//! Region ranges published on the bus must keep function bands off their
//! lines, whole or in part.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use blockbands::decorate::LayerKind;
use blockbands::{ColorPolicy, Document, LanguageId, LineRange};
use common::{annotations, colorizer, painted_band_lines, refresh, DASHBOARD_TSX};

const INIT_REGION: &str = "\
function outer() {
  return 1;
}
// #region Init
function hidden() {
  const x = 1;
  return x;
}
const y = () => 2;

// #endregion
function after() {
  return 3;
}
";

#[test]
fn test_region_lines_are_excluded() {
    let output = refresh(INIT_REGION, LanguageId::JavaScript);
    assert_eq!(output.exclusions, vec![LineRange::new(3, 10)]);

    let lines = painted_band_lines(&output);
    assert_eq!(lines, vec![0, 1, 2, 11, 12, 13]);
    assert!(annotations(&output)
        .iter()
        .all(|(_, a)| !a.contains("hidden") && a != "function: y"));
}

#[test]
fn test_region_layer_covers_region() {
    let output = refresh(INIT_REGION, LanguageId::JavaScript);
    let region_lines: Vec<usize> = output
        .entries(LayerKind::Region)
        .map(|(_, e)| e.range.line)
        .collect();
    assert_eq!(region_lines, (3..=10).collect::<Vec<_>>());
}

#[test]
fn test_partially_excluded_block_is_split() {
    let source = "\
function big() {
  const a = 1;
  // #region Setup
  const b = 2;
  // #endregion
  return a + b;
}
";
    let output = refresh(source, LanguageId::JavaScript);
    let exclusion = LineRange::new(2, 4);
    assert_eq!(output.exclusions, vec![exclusion]);

    let lines = painted_band_lines(&output);
    assert_eq!(lines, vec![0, 1, 5, 6]);
    assert!(lines.iter().all(|l| !exclusion.contains_line(*l)));
    assert_eq!(annotations(&output), vec![(0, "function: big".to_string())]);
}

#[test]
fn test_annotation_moves_to_first_visible_piece() {
    let source = "\
// #region Head
function wrapped() {
// #endregion
  const a = 1;
  return a;
}
";
    let output = refresh(source, LanguageId::JavaScript);
    assert_eq!(output.exclusions, vec![LineRange::new(0, 2)]);
    assert_eq!(annotations(&output), vec![(3, "function: wrapped".to_string())]);
    assert_eq!(painted_band_lines(&output), vec![3, 4, 5]);
}

#[test]
fn test_no_band_line_inside_any_exclusion() {
    let output = refresh(DASHBOARD_TSX, LanguageId::Tsx);
    assert_eq!(output.exclusions.len(), 2);
    for line in painted_band_lines(&output) {
        assert!(
            output.exclusions.iter().all(|r| !r.contains_line(line)),
            "line {} painted inside an exclusion",
            line
        );
    }
}

#[test]
fn test_each_line_painted_once() {
    let output = refresh(DASHBOARD_TSX, LanguageId::Tsx);
    let lines = painted_band_lines(&output);
    let mut deduped = lines.clone();
    deduped.dedup();
    assert_eq!(lines, deduped);
}

#[test]
fn test_exclusions_replaced_on_next_refresh() {
    let mut colorizer = colorizer(ColorPolicy::Hash);
    let first = colorizer.refresh(&Document::new(INIT_REGION, LanguageId::JavaScript));
    assert_eq!(first.exclusions.len(), 1);

    let without_markers: String = INIT_REGION
        .lines()
        .map(|l| if l.contains("region") { "" } else { l })
        .collect::<Vec<_>>()
        .join("\n");
    let second = colorizer.refresh(&Document::new(without_markers, LanguageId::JavaScript));
    assert!(second.exclusions.is_empty());
    assert!(painted_band_lines(&second).contains(&5));
}

#[test]
fn test_extra_subscriber_sees_every_publish() {
    let mut colorizer = colorizer(ColorPolicy::Hash);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    colorizer
        .bus_mut()
        .subscribe(move |set| sink.borrow_mut().push(set.clone()));

    colorizer.refresh(&Document::new(INIT_REGION, LanguageId::JavaScript));
    colorizer.refresh(&Document::new("const a = 1;\n", LanguageId::JavaScript));

    let seen = seen.borrow();
    // initial replay plus one publish per refresh
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1], vec![LineRange::new(3, 10)]);
    assert!(seen[2].is_empty());
}

#[test]
fn test_panicking_subscriber_does_not_break_refresh() {
    let mut colorizer = colorizer(ColorPolicy::Hash);
    colorizer.bus_mut().subscribe(|set| {
        if !set.is_empty() {
            panic!("bad subscriber");
        }
    });

    let output = colorizer.refresh(&Document::new(INIT_REGION, LanguageId::JavaScript));
    assert_eq!(painted_band_lines(&output), vec![0, 1, 2, 11, 12, 13]);
}

use markdown_portable_engine::{
    PortableBlock,
    pipeline::{ConversionOutcome, ConversionPipeline, PreviewStatus, convert_text},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn preview_text(p: &ConversionPipeline) -> Vec<String> {
    p.preview()
        .blocks
        .iter()
        .map(|b| match b {
            PortableBlock::Text(t) => t.children.iter().map(|s| s.text.as_str()).collect(),
            PortableBlock::Code(c) => c.code.clone(),
            PortableBlock::Image(i) => i.src.clone(),
        })
        .collect()
}

/// `t2` is submitted after `t1`; whichever finishes first, the preview must
/// end up holding `t2`.
#[rstest]
#[case::newer_finishes_first(true)]
#[case::newer_finishes_last(false)]
fn preview_holds_latest_submission(#[case] newer_first: bool) {
    let p = ConversionPipeline::new();
    let t1 = p.begin();
    let t2 = p.begin();
    let r1 = convert_text("first draft");
    let r2 = convert_text("second draft");

    let (o1, o2) = if newer_first {
        let o2 = p.finish(t2, r2);
        (p.finish(t1, r1), o2)
    } else {
        let o1 = p.finish(t1, r1);
        (o1, p.finish(t2, r2))
    };

    assert_eq!(o1, ConversionOutcome::Superseded);
    assert_eq!(o2, ConversionOutcome::Committed(PreviewStatus::Current));
    assert_eq!(preview_text(&p), vec!["second draft"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn burst_of_submissions_settles_on_the_last() {
    let p = ConversionPipeline::new();
    let big = "- item with **bold** and `code`\n".repeat(2_000);

    let mut handles = vec![];
    for i in 0..20 {
        let text = if i % 2 == 0 {
            format!("{big}\nrevision {i}")
        } else {
            format!("revision {i}")
        };
        handles.push(tokio::spawn(p.convert(text)));
    }

    let mut committed = 0;
    for h in handles {
        if let ConversionOutcome::Committed(_) = h.await.unwrap() {
            committed += 1;
        }
    }

    assert_eq!(committed, 1);
    assert_eq!(preview_text(&p), vec!["revision 19"]);
    assert_eq!(p.preview().generation, 20);
}

#[tokio::test]
async fn clearing_the_editor_empties_the_preview() {
    let p = ConversionPipeline::new();
    p.convert("# Heading".to_string()).await;
    assert_eq!(p.preview().status, PreviewStatus::Current);

    let outcome = p.convert(String::new()).await;
    assert_eq!(outcome, ConversionOutcome::Committed(PreviewStatus::Empty));
    assert!(p.preview().blocks.is_empty());
    assert!(p.preview().content_hash.is_some());
}

#[tokio::test]
async fn sessions_are_independent() {
    let a = ConversionPipeline::new();
    let b = ConversionPipeline::new();

    let (oa, ob) = tokio::join!(a.convert("alpha".into()), b.convert("beta".into()));

    assert_eq!(oa, ConversionOutcome::Committed(PreviewStatus::Current));
    assert_eq!(ob, ConversionOutcome::Committed(PreviewStatus::Current));
    assert_eq!(preview_text(&a), vec!["alpha"]);
    assert_eq!(preview_text(&b), vec!["beta"]);
}

#[tokio::test]
async fn warnings_reach_the_preview() {
    let p = ConversionPipeline::new();
    p.convert("```\nstill typing".to_string()).await;
    let snap = p.preview();
    assert_eq!(snap.status, PreviewStatus::Current);
    assert_eq!(snap.warnings.len(), 1);
}

mod common;

use cardwright::{
    DirectorySink, ExecutorImpl, InMemoryResourceProvider, JsonArraySource, JsonLinesSource,
    MemorySink, PipelineBuilder, PipelineConfig, PipelineError, VecEntrySource,
};
use common::fixtures::*;
use common::{entry_from, pipeline_for, solid_png, BlockTextBackend, TestResult};
use serde_json::json;
use std::fs;
use std::sync::Arc;

const GREEN: [u8; 4] = [0, 200, 0, 255];
const PARCHMENT: [u8; 4] = [0xf0, 0xe6, 0xd2, 255];
const HEADER: [u8; 4] = [0x30, 0x30, 0x60, 255];

fn monster_resources() -> InMemoryResourceProvider {
    let resources = InMemoryResourceProvider::new();
    resources
        .add("art/goblin.png", solid_png(4, 4, GREEN))
        .unwrap();
    resources
        .add("art/dragon.png", solid_png(8, 4, GREEN))
        .unwrap();
    resources
}

fn monster_source() -> VecEntrySource {
    VecEntrySource::new(monster_entries().into_iter().map(entry_from).collect())
}

#[test]
fn test_generate_monster_cards() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let backend = BlockTextBackend::new();
    let pipeline = pipeline_for(&monster_card(), backend.clone(), monster_resources())?;
    let mut sink = MemorySink::new();
    let report = pipeline.generate(&mut monster_source(), &mut sink)?;

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.rendered, 3);
    assert!(sink.is_finished());

    let cards = sink.into_cards();
    let names: Vec<&str> = cards.iter().map(|c| c.file_name.as_str()).collect();
    assert_eq!(names, vec!["core/Goblin.png", "core/Troll.png", "promo/Dragon.png"]);
    assert!(cards.iter().all(|c| (c.width(), c.height()) == (200, 280)));

    let (goblin, troll, dragon) = (&cards[0], &cards[1], &cards[2]);

    // Header bar with the name drawn in white on its left side.
    assert_card_pixel!(goblin, (100, 20), HEADER);
    assert_card_pixel!(goblin, (15, 20), WHITE);

    // Artwork, or the background where optional art is missing.
    assert_card_pixel!(goblin, (100, 110), GREEN);
    assert_card_pixel!(troll, (100, 110), PARCHMENT);

    // Power pips along the bottom edge.
    assert_card_pixel!(goblin, (18, 262), BLUE);
    assert_card_pixel!(goblin, (38, 262), BLUE);
    assert_card_pixel!(goblin, (58, 262), PARCHMENT);
    assert_card_lacks_color!(troll, BLUE);
    assert_card_pixel!(dragon, (78, 262), BLUE);

    // Cost badge text is drawn inside the red circle.
    assert_card_has_color!(goblin, RED);
    assert!(backend.drawn_texts().contains(&"9".to_string()));
    Ok(())
}

#[test]
fn test_render_all_keeps_entry_order() -> TestResult {
    let pipeline = pipeline_for(&monster_card(), BlockTextBackend::new(), monster_resources())?;
    let entries = vec![
        entry_from(json!({"set": "a", "name": "One", "cost": 1, "art": "x.png"})),
        entry_from(json!({"set": "a", "name": "Two", "art": "x.png"})),
        entry_from(json!({"set": "a", "name": "Three", "cost": 3, "art": "x.png"})),
    ];

    let results = pipeline.render_all(entries);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().file_name, "a/One.png");
    assert!(matches!(results[1], Err(PipelineError::Layout(_))));
    assert_eq!(results[2].as_ref().unwrap().index, 2);
    Ok(())
}

#[test]
fn test_failures_are_counted_or_fatal() -> TestResult {
    let bad_batch = || {
        VecEntrySource::new(vec![
            entry_from(json!({"set": "a", "name": "Ok", "cost": 1, "art": "x.png"})),
            entry_from(json!({"set": "a", "name": "NoCost", "art": "x.png"})),
            entry_from(json!({"set": "a", "name": "AlsoOk", "cost": 2, "art": "x.png"})),
        ])
    };

    let pipeline = pipeline_for(&monster_card(), BlockTextBackend::new(), monster_resources())?;
    let mut sink = MemorySink::new();
    let report = pipeline.generate(&mut bad_batch(), &mut sink)?;
    assert_eq!(report.rendered, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert!(report.failures[0].message.contains("cost"));
    assert_eq!(sink.cards().len(), 2);

    let strict = PipelineBuilder::new()
        .with_schema_source(&monster_card().to_string())?
        .with_text_backend(BlockTextBackend::new())
        .with_resource_provider(Arc::new(monster_resources()))
        .with_config(PipelineConfig::sequential().with_fail_fast(true))
        .build()?;
    let err = strict
        .generate(&mut bad_batch(), &mut MemorySink::new())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Card { index: 1, .. }));
    Ok(())
}

#[test]
fn test_unreadable_entries_are_reported() -> TestResult {
    let pipeline = pipeline_for(&monster_card(), BlockTextBackend::new(), monster_resources())?;
    let mut source = JsonArraySource::from_str(
        r#"[{"set": "a", "name": "A", "cost": 1, "art": "-"}, 42,
            {"set": "a", "name": "C", "cost": 1, "art": "-"}]"#,
    )?;
    let mut sink = MemorySink::new();
    let report = pipeline.generate(&mut source, &mut sink)?;

    assert_eq!(report.rendered, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    let indices: Vec<usize> = sink.cards().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 2]);
    Ok(())
}

#[test]
fn test_parallel_output_matches_sequential() -> TestResult {
    let entries: Vec<_> = (0..12)
        .map(|i| {
            entry_from(json!({
                "set": "bulk", "name": format!("Card{}", i), "cost": i,
                "art": if i % 2 == 0 { "goblin.png" } else { "dragon.png" },
                "power": i % 4
            }))
        })
        .collect();

    let sequential = pipeline_for(&monster_card(), BlockTextBackend::new(), monster_resources())?;
    let parallel = PipelineBuilder::new()
        .with_schema_source(&monster_card().to_string())?
        .with_text_backend(BlockTextBackend::new())
        .with_resource_provider(Arc::new(monster_resources()))
        .with_config(PipelineConfig::default().with_batch_size(5))
        .with_executor(ExecutorImpl::for_parallelism(true))
        .build()?;

    let mut a = MemorySink::new();
    let mut b = MemorySink::new();
    sequential.generate(&mut VecEntrySource::new(entries.clone()), &mut a)?;
    parallel.generate(&mut VecEntrySource::new(entries), &mut b)?;

    assert_eq!(a.cards().len(), 12);
    for (x, y) in a.cards().iter().zip(b.cards()) {
        assert_eq!(x.index, y.index);
        assert_eq!(x.file_name, y.file_name);
        assert!(x.image == y.image, "card {} differs", x.index);
    }
    Ok(())
}

#[test]
fn test_schema_file_resources_and_directory_output() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let project = tmp.path().join("project");
    fs::create_dir_all(project.join("art"))?;
    fs::write(project.join("schema.json"), monster_card().to_string())?;
    fs::write(project.join("art/goblin.png"), solid_png(4, 4, GREEN))?;
    fs::write(
        project.join("monsters.jsonl"),
        "{\"set\": \"core\", \"name\": \"Goblin\", \"cost\": 1, \"art\": \"goblin.png\", \"power\": 1}\n\n\
         {\"set\": \"core\", \"name\": \"Ghost\", \"cost\": 2, \"art\": \"ghost.png\"}\n",
    )?;

    let pipeline = PipelineBuilder::new()
        .with_schema_file(project.join("schema.json"))?
        .with_text_backend(BlockTextBackend::new())
        .with_config(PipelineConfig::sequential())
        .build()?;

    let out = tmp.path().join("out");
    let mut source = JsonLinesSource::from_path(project.join("monsters.jsonl"))?;
    let mut sink = DirectorySink::new(&out)?;
    let report = pipeline.generate(&mut source, &mut sink)?;
    assert_eq!(report.rendered, 2);

    let goblin = image::open(out.join("core/Goblin.png"))?.to_rgba8();
    assert_eq!(goblin.dimensions(), (200, 280));
    assert_eq!(goblin.get_pixel(100, 110).0, GREEN);
    assert!(out.join("core/Ghost.png").is_file());
    Ok(())
}

#[test]
fn test_builder_errors() {
    assert!(matches!(
        PipelineBuilder::new().build(),
        Err(PipelineError::Config(_))
    ));

    assert!(matches!(
        PipelineBuilder::new().with_schema_source("{\"width\": 10"),
        Err(PipelineError::Layout(_))
    ));

    assert!(matches!(
        PipelineBuilder::new().with_schema_file("/definitely/not/here.json"),
        Err(PipelineError::Io(_))
    ));

    // Schema fonts are loaded through the resource provider when the built-in
    // rasterizer is used.
    let with_font = json!({
        "width": 10, "height": 10,
        "fonts": [{"alias": "body", "path": "fonts/Body.ttf"}],
        "root": {"type": "container"}
    });
    let result = PipelineBuilder::new()
        .with_schema_source(&with_font.to_string())
        .and_then(|b| {
            b.with_resource_provider(Arc::new(InMemoryResourceProvider::new()))
                .build()
        });
    assert!(matches!(result, Err(PipelineError::Layout(_))));
}

#[cfg(feature = "rayon-executor")]
#[test]
fn test_dedicated_thread_pool_renders_every_card() -> TestResult {
    use cardwright::{Executor, RayonExecutor};

    let executor = ExecutorImpl::Rayon(RayonExecutor::with_threads(2)?);
    assert_eq!(executor.parallelism(), 2);

    let pipeline = PipelineBuilder::new()
        .with_schema_source(&monster_card().to_string())?
        .with_text_backend(BlockTextBackend::new())
        .with_resource_provider(Arc::new(monster_resources()))
        .with_config(PipelineConfig::default().with_batch_size(2))
        .with_executor(executor)
        .build()?;
    assert_eq!(pipeline.executor_name(), "RayonExecutor");

    let mut sink = MemorySink::new();
    let report = pipeline.generate(&mut monster_source(), &mut sink)?;
    assert_eq!(report.rendered, 3);
    let indices: Vec<usize> = sink.cards().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    Ok(())
}

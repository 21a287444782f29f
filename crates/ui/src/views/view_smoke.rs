use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_both_rooms() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Vocal"), "missing app title in {html}");
    assert!(html.contains("Training Room"), "missing training room in {html}");
    assert!(html.contains("Exam Room"), "missing exam room in {html}");
    assert!(
        html.contains("Inclusive Learning for Every Child"),
        "missing features section in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn classroom_view_smoke_renders_every_animal_card() {
    let mut harness = setup_view_harness(ViewKind::Classroom);
    harness.rebuild();
    let html = harness.render();

    for name in [
        "Lion", "Elephant", "Monkey", "Cow", "Cat", "Dog", "Bear", "Frog", "Mouse", "Chicken",
    ] {
        assert!(html.contains(name), "missing {name} card in {html}");
    }
    assert!(html.contains("Play Sound"), "missing play control in {html}");
    assert!(html.contains("Speak Now"), "missing speak control in {html}");
    assert!(html.contains("Guided Tour"), "missing tour panel in {html}");
    assert!(html.contains("Start Tour"), "missing tour start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_grid_and_start_button() {
    let mut harness = setup_view_harness(ViewKind::Exam);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Animal Exam Room"), "missing heading in {html}");
    assert!(html.contains("Start Exam"), "missing start button in {html}");
    // Before a run starts the room doubles as a practice grid.
    assert!(html.contains("Lion"), "missing practice grid in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn accessibility_controls_smoke_renders_toggles() {
    let mut harness = setup_view_harness(ViewKind::Accessibility);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("High Contrast"), "missing contrast toggle in {html}");
    assert!(html.contains("Large Text"), "missing text toggle in {html}");
    assert!(html.contains("Sound On"), "missing sound toggle in {html}");
}

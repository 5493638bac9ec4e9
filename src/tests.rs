use super::*;
use std::io::{Cursor, Write};
use tempfile::{NamedTempFile, TempDir};

fn create_temp_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn six_slide_deck() -> Deck {
    Deck::new(["intro", "agenda", "instructor", "setup", "lab", "qa"]).unwrap()
}

#[test]
fn test_config_to_html_pipeline() {
    let config_file = create_temp_config_file(
        r#"{
            "global": { "footer_text": "Workshop 2026" },
            "slides": [
                { "id": "intro", "title": "Welcome" },
                { "id": "agenda", "title": "Agenda",
                  "modules": [ { "title": "RLHF", "description": "Preference tuning", "duration": 60 } ] }
            ]
        }"#,
    );

    let deck_config = DeckConfig::load(config_file.path()).expect("Failed to load config");
    let deck = Deck::from_config(&deck_config).expect("Failed to build deck");
    assert_eq!(deck.ids().collect::<Vec<_>>(), vec!["intro", "agenda"]);

    let html = generate_html(&deck_config, &[], &[], true, Theme::Light).unwrap();
    assert!(html.contains("<h1>Welcome</h1>"));
    assert!(html.contains("<span class=\"agenda-duration\">60 mins</span>"));
    assert_eq!(html.matches("Workshop 2026</footer>").count(), 2);
}

#[test]
fn test_embedded_css_in_rendered_deck() {
    let css_file = create_temp_config_file(".slide.active { display: block; }");
    let css = ResourceFile::new(css_file.path().to_str().unwrap());

    let html = generate_html(
        &DeckConfig::workshop_default(),
        &[css],
        &[],
        true,
        Theme::Light,
    )
    .unwrap();
    assert!(html.contains("<style>.slide.active { display: block; }</style>"));
}

#[test]
fn test_presenter_transcript_and_persistence() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let state_path = dir.path().join("state.json");
    let titles: Vec<String> = six_slide_deck().ids().map(str::to_string).collect();

    let session = DeckSession::open(
        &six_slide_deck(),
        DeckView::new(6),
        FileStore::new(&state_path),
        "currentSlide",
        Theme::Light,
    );

    let input = Cursor::new("next\nnext\nprev\ngoto 5\ntheme\nesc\nend\nnext\nbogus\nquit\nnext\n");
    let mut output = Vec::new();
    let last = present(session, &titles, input, &mut output).expect("Presenter failed");
    assert_eq!(last, 5);

    let transcript = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines[0], "[1/6] intro [light]");
    assert_eq!(lines[1], "[2/6] agenda [light]");
    assert_eq!(lines[2], "[3/6] instructor [light]");
    assert_eq!(lines[3], "[2/6] agenda [light]");
    assert_eq!(lines[4], "[5/6] lab [light]");
    assert_eq!(lines[5], "[5/6] lab [dark]");
    assert_eq!(lines[6], "[5/6] lab (presenting) [dark]");
    assert_eq!(lines[7], "[6/6] qa (presenting) [dark]");
    assert_eq!(lines[8], "[6/6] qa (presenting) [dark]");
    assert!(lines[9].starts_with("unknown command \"bogus\""));
    assert_eq!(lines.len(), 10);

    let store = FileStore::new(&state_path);
    assert_eq!(store.get("currentSlide"), Some("5".to_string()));
}

#[test]
fn test_presenter_resumes_from_saved_slide() {
    let mut store = MemoryStore::new();
    store.set("currentSlide", "2").unwrap();
    let titles: Vec<String> = six_slide_deck().ids().map(str::to_string).collect();

    let session = DeckSession::open(
        &six_slide_deck(),
        DeckView::new(6),
        store,
        "currentSlide",
        Theme::Dark,
    );

    let mut output = Vec::new();
    let last = present(session, &titles, Cursor::new(""), &mut output).unwrap();
    assert_eq!(last, 2);
    assert_eq!(String::from_utf8(output).unwrap(), "[3/6] instructor [dark]\n");
}

#[test]
fn test_restore_out_of_range_falls_back_to_first_slide() {
    let mut nav = SlideNavigator::new(&six_slide_deck(), DeckView::new(6));
    nav.restore(Some("99"));
    assert_eq!(nav.current(), 0);
    assert_eq!(nav.view().active_slides(), vec![0]);
}

use std::sync::Arc;

use lipi_core::dictionary::Dictionary;
use lipi_core::mapping::MappingTable;
use lipi_core::patterns::PatternSet;
use lipi_core::Transliterator;

use crate::{InputSession, KeyEvent};

mod proptest_fsm;

fn make_test_engine() -> Arc<Transliterator> {
    let mapping = MappingTable::from_json_str(
        r#"{
            "vowels": {"a": "আ", "i": "ই", "u": "উ", "o": "ও", "e": "এ"},
            "consonants": {
                "k": "ক", "kh": "খ", "g": "গ", "t": "ত", "m": "ম",
                "b": "ব", "bh": "ভ", "v": "ভ", "l": "ল", "s": "স",
                "sh": "শ", "h": "হ", "r": "র", "n": "ন", "y": "য়"
            },
            "kars": {"a": "া", "i": "ি", "u": "ু", "o": "ো", "e": "ে"},
            "folas": {"y": "্য", "r": "্র"}
        }"#,
    )
    .unwrap();
    let dictionary = Dictionary::from_entries([("ami", "আমি"), ("tumi", "তুমি")]);
    Arc::new(Transliterator::from_parts(
        mapping,
        dictionary,
        PatternSet::empty(),
    ))
}

fn make_session() -> InputSession {
    InputSession::new(make_test_engine())
}

fn type_string(session: &mut InputSession, text: &str) {
    for c in text.chars() {
        session.handle_key(KeyEvent::Text(c));
    }
}

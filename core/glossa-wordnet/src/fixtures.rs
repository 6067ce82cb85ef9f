//! A small multilingual fixture store shared by the engine tests: an English
//! noun taxonomy with a diamond and a deliberate cycle, an ambiguous index
//! entry, a Latin morphological lexicon and a semantic-field hierarchy.

use std::rc::Rc;

use glossa_protocol::{
    IndexRow, Language, LemmaRow, Lexicon, MorphoRow, RelationRow, SemfieldHierarchyRow,
    SemfieldRow, SharedTables, SynonymRow, SynsetRow,
};
use glossa_store::MemoryStore;

use crate::StoreHandle;

fn synset(id: &str, word: &str, gloss: &str) -> SynsetRow {
    SynsetRow {
        id: id.to_string(),
        word: word.to_string(),
        phrase: None,
        gloss: gloss.to_string(),
    }
}

fn relation(ty: &str, source: &str, target: &str) -> RelationRow {
    RelationRow {
        ty: ty.to_string(),
        id_source: source.to_string(),
        id_target: target.to_string(),
        w_source: None,
        w_target: None,
        status: None,
    }
}

fn lexical(ty: &str, source: &str, target: &str, w_source: &str, w_target: &str) -> RelationRow {
    RelationRow {
        w_source: Some(w_source.to_string()),
        w_target: Some(w_target.to_string()),
        ..relation(ty, source, target)
    }
}

fn index(lemma: &str, n: Option<&str>, v: Option<&str>, a: Option<&str>) -> IndexRow {
    IndexRow {
        lemma: lemma.to_string(),
        id_n: n.map(str::to_string),
        id_v: v.map(str::to_string),
        id_a: a.map(str::to_string),
        id_r: None,
    }
}

fn morpho(id: &str, lemma: &str, pos: &str, parts: &str, irregular: &str, tag: &str) -> MorphoRow {
    MorphoRow {
        id: id.to_string(),
        lemma: lemma.to_string(),
        pos: pos.to_string(),
        principal_parts: parts.to_string(),
        irregular_forms: irregular.to_string(),
        alternative_forms: String::new(),
        pronunciation: String::new(),
        script: None,
        miscellanea: tag.to_string(),
    }
}

fn field(code: &str, english: &str, hypers: &str, hypons: &str, normal: &str) -> SemfieldHierarchyRow {
    SemfieldHierarchyRow {
        code: code.to_string(),
        english: english.to_string(),
        hypers: hypers.to_string(),
        hypons: hypons.to_string(),
        normal: normal.to_string(),
    }
}

fn english() -> Lexicon {
    Lexicon {
        synset: Some(vec![
            synset("n#00000001", "entity", "that which exists"),
            synset("n#00000002", "animal beast", "a living organism"),
            synset("n#00000003", "Dog domestic_dog GAP!", "a domesticated canine"),
            synset("n#00000004", "cat", "a small domesticated felid"),
            synset("n#00000005", "pet", "an animal kept for companionship"),
            synset("n#00000040", "ouroboros_x", "first half of a data cycle"),
            synset("n#00000041", "ouroboros_y", "second half of a data cycle"),
            synset("a#00000020", "good", "having desirable qualities"),
            synset("a#00000021", "bad", "lacking desirable qualities"),
            synset("v#00000010", "run", "move fast on foot"),
        ]),
        lemma: Some(vec![
            LemmaRow { lemma: "entity".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "animal".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "dog".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "domestic_dog".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "cat".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "pet".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "bank".to_string(), pos: "n".to_string() },
            LemmaRow { lemma: "bank".to_string(), pos: "v".to_string() },
            LemmaRow { lemma: "good".to_string(), pos: "a".to_string() },
            LemmaRow { lemma: "bad".to_string(), pos: "a".to_string() },
            LemmaRow { lemma: "run".to_string(), pos: "v".to_string() },
        ]),
        index: Some(vec![
            index("entity", Some("n#00000001"), None, None),
            index("animal", Some("n#00000002"), None, None),
            index("dog", Some("n#00000003"), None, None),
            index("domestic_dog", Some("n#00000003"), None, None),
            index("cat", Some("n#00000004"), None, None),
            index("pet", Some("n#00000005"), None, None),
            index("bank", Some("n#00000006"), Some("v#00000011"), None),
            index("good", None, None, Some("a#00000020")),
            index("bad", None, None, Some("a#00000021")),
            index("run", None, Some("v#00000010"), None),
        ]),
        morpho: None,
        relation: Some(vec![
            lexical("!", "a#00000020", "a#00000021", "good", "bad"),
            lexical("\\", "a#00000022", "n#00000003", "doggish", "dog"),
        ]),
        synonyms: Some(vec![
            SynonymRow {
                pos: "n".to_string(),
                syn: "00000003".to_string(),
                lemma: "dog".to_string(),
            },
            SynonymRow {
                pos: "n".to_string(),
                syn: "00000003".to_string(),
                lemma: "domestic_dog".to_string(),
            },
        ]),
        semfield: None,
    }
}

fn latin() -> Lexicon {
    Lexicon {
        synset: Some(vec![synset(
            "n#L0000001",
            "aqua",
            "aqua, liquid of rivers and seas",
        )]),
        lemma: None,
        index: Some(vec![index("aqua", Some("n#L0000001"), None, None)]),
        morpho: Some(vec![
            morpho("c1", "canis", "n", "can", "", "n-s---mn3-"),
            morpho("c2", "canis", "n", "can", "", "n-s---fn3-"),
            morpho("a1", "amo", "v", "am amav amat", "pft1s=amavi", "v1spia--1-"),
            morpho("q1", "aqua", "n", "aqu", "", "n-s---fn1-"),
            morpho("h1", "hic", "p", "", "", "p-s---mn--"),
        ]),
        relation: Some(vec![RelationRow {
            status: Some("NEW".to_string()),
            ..relation("@", "n#L0000001", "n#00000001")
        }]),
        synonyms: None,
        semfield: None,
    }
}

fn shared() -> SharedTables {
    SharedTables {
        relation: Some(vec![
            relation("@", "n#00000003", "n#00000002"),
            relation("@", "n#00000003", "n#00000005"),
            relation("@", "n#00000004", "n#00000002"),
            relation("@", "n#00000002", "n#00000001"),
            relation("@", "n#00000005", "n#00000001"),
            // Malformed-on-purpose cycle
            relation("@", "n#00000040", "n#00000041"),
            relation("@", "n#00000041", "n#00000040"),
        ]),
        semfield: Some(vec![SemfieldRow {
            english: "biology".to_string(),
            synset: "n#00000003".to_string(),
        }]),
        semfield_hierarchy: Some(vec![
            field("20", "pure_science", "", "biology chemistry", "pure_science"),
            field("2030", "biology", "pure_science", "", "pure_science"),
            field("2040", "chemistry", "pure_science", "", "pure_science"),
            field("28", "play", "", "", "play"),
            field("65", "play", "", "", "play"),
        ]),
    }
}

/// The fixture store every engine test runs against.
pub(crate) fn store() -> StoreHandle {
    let mut store = MemoryStore::new();
    store.insert(Language::English, english());
    store.insert(Language::Latin, latin());
    store.set_shared(shared());
    Rc::new(store)
}

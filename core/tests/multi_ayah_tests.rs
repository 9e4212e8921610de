mod common;

use ayah_core::{search_multi_ayah, CorpusIndex, SearchOptions, TextForm, VerseKey};
use common::{corpus_of, passage, INDEX};

fn search(query: &str, threshold: f64) -> Vec<ayah_core::MultiAyahMatch> {
    search_multi_ayah(query, &SearchOptions::default().with_threshold(threshold), &INDEX).unwrap()
}

#[test]
fn finds_opening_of_ar_rahman() {
    let matches = search("الرحمن علم القران خلق الانسان علمه البيان", 80.0);
    let hit = matches.iter().find(|m| m.reference() == "55:1-4").expect("55:1-4 is found");
    assert!(hit.similarity >= 95.0, "similarity {}", hit.similarity);
    assert_eq!(hit.start.word, 0);
    assert_eq!(hit.end.word, 2);
    assert_eq!(hit.to_string(), format!("55:1-4 ({:.1}): {}", hit.similarity, hit.matched_text));
    assert!(hit.to_string().starts_with("55:1-4 (95.1): الرحمن علم"));
}

#[test]
fn opening_formula_folds_into_first_verse() {
    let matches = search("بسم الله الرحمن الرحيم الم ذلك الكتاب لا ريب فيه هدى للمتقين", 80.0);
    let hit = matches.iter().find(|m| m.reference() == "2:1-2").expect("2:1-2 is found");
    assert_eq!(hit.start.key(), VerseKey::new(2, 0));
    assert_eq!(hit.start.word, 0);
    assert_eq!(hit.end.key(), VerseKey::new(2, 2));
    // Leading separator is trimmed off the aligned window.
    assert!(hit.matched_text.starts_with("بسم"));
}

#[test]
fn crosses_chapter_boundary() {
    let query = passage(&[(93, 6), (93, 7), (93, 8), (93, 9), (93, 10), (93, 11), (94, 0), (94, 1)]);
    let matches = search(&query, 80.0);
    let hit = &matches[0];
    assert_eq!(hit.similarity, 100.0);
    assert_eq!(
        hit.verses,
        vec![
            VerseKey::new(93, 6),
            VerseKey::new(93, 7),
            VerseKey::new(93, 8),
            VerseKey::new(93, 9),
            VerseKey::new(93, 10),
            VerseKey::new(93, 11),
            VerseKey::new(94, 0),
            VerseKey::new(94, 1),
        ]
    );
    assert!(hit.spans_chapters());
    assert_eq!(hit.reference(), "93:6-94:1");
}

#[test]
fn crosses_chapter_boundary_with_stray_space() {
    let query = "الم يجدك يتيما فاوى ووجدك ضالا فهدى ووجدك عائلا فاغنى فاما اليتيم فلا تقهر \
                 واما السائل فلا تنهر و اما بنعمة ربك فحدث بسم الله الرحمن الرحيم الم نشرح لك صدرك";
    let matches = search(query, 75.0);
    let hit = matches.iter().find(|m| m.spans_chapters()).expect("a match crossing 93 into 94");
    assert_eq!(hit.start.chapter, 93);
    assert_eq!(hit.end.chapter, 94);
    assert!(hit.similarity > 95.0);
}

#[test]
fn unrelated_query_finds_nothing() {
    assert!(search("xyzzy plugh frobozz", 80.0).is_empty());
    assert!(search("ظظظظ غغغغ ثثثث", 80.0).is_empty());
}

#[test]
fn repeated_calls_agree() {
    let query = "فباي الاء ربكما تكذبان";
    assert_eq!(search(query, 80.0), search(query, 80.0));
}

#[test]
fn repeated_phrase_keeps_corpus_order_on_ties() {
    let matches = search("فباي الاء ربكما تكذبان", 80.0);
    let refs: Vec<String> = matches.iter().map(|m| m.reference()).collect();
    assert_eq!(refs, vec!["55:13", "55:16"]);
    assert_eq!(matches[0].similarity, matches[1].similarity);
}

#[test]
fn every_occurrence_is_reported_without_overlap() {
    let matches = search("بسم الله الرحمن الرحيم", 80.0);
    let refs: Vec<String> = matches.iter().map(|m| m.reference()).collect();
    assert_eq!(refs, vec!["1:1", "2:0", "3:0", "55:0", "93:0", "94:0", "112:0"]);
    for pair in matches.windows(2) {
        assert!(pair[0].char_range().end <= pair[1].char_range().start);
    }
    assert!(matches.iter().all(|m| m.similarity == 100.0 && m.verse_count() == 1));
}

#[test]
fn max_results_truncates_ranked_list() {
    let options = SearchOptions::default().with_max_results(3);
    let matches = search_multi_ayah("بسم الله الرحمن الرحيم", &options, &INDEX).unwrap();
    let refs: Vec<String> = matches.iter().map(|m| m.reference()).collect();
    assert_eq!(refs, vec!["1:1", "2:0", "3:0"]);
}

#[test]
fn searches_original_text() {
    let options = SearchOptions::default().with_form(TextForm::Original);
    let matches = search_multi_ayah("لَمۡ يَلِدۡ وَلَمۡ يُولَدۡ", &options, &INDEX).unwrap();
    assert_eq!(matches[0].reference(), "112:3");
    assert_eq!(matches[0].similarity, 100.0);
    assert_eq!(matches[0].matched_text, "لَمۡ يَلِدۡ وَلَمۡ يُولَدۡ");
}

#[test]
fn strong_match_after_weak_region_is_found() {
    let corpus = corpus_of(&[(1, 1, "والفجر وليال عشر والشفع والوتر"), (1, 2, "لم يلد ولم يولد")]);
    let index = CorpusIndex::build(&corpus);
    let matches = search_multi_ayah("لم يلد ولم يولد", &SearchOptions::default(), &index).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].reference(), "1:2");
}

#[test]
fn qualifying_match_before_best_is_not_reported() {
    let weaker = (1, 1, "لم يلد ولم يلد");
    let filler = (1, 2, "والفجر وليال عشر");
    let exact = (1, 3, "لم يلد ولم يولد");

    // On its own the weaker verse clears the threshold.
    let alone = CorpusIndex::build(&corpus_of(&[weaker, filler]));
    let found = search_multi_ayah("لم يلد ولم يولد", &SearchOptions::default(), &alone).unwrap();
    assert_eq!(found[0].reference(), "1:1");

    // The cursor jumps past the best alignment, so the earlier one is skipped.
    let index = CorpusIndex::build(&corpus_of(&[weaker, filler, exact]));
    let found = search_multi_ayah("لم يلد ولم يولد", &SearchOptions::default(), &index).unwrap();
    let refs: Vec<String> = found.iter().map(|m| m.reference()).collect();
    assert_eq!(refs, vec!["1:3"]);
}

#[test]
fn invalid_threshold_is_rejected() {
    let options = SearchOptions::default().with_threshold(101.0);
    assert!(search_multi_ayah("الرحمن", &options, &INDEX).is_err());
}

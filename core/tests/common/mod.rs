#![allow(dead_code)]

use ayah_core::{Corpus, CorpusIndex};
use lazy_static::lazy_static;
use tracing_subscriber::{fmt, EnvFilter};

const OPENING: &str = "بسم الله الرحمن الرحيم";

/// A slice of the corpus in Uthmani spelling with the marks already removed,
/// plus chapter 112 with full diacritics.
pub const VERSES: &[(u16, u16, &str)] = &[
    (1, 1, OPENING),
    (1, 2, "الحمد لله رب العلمين"),
    (1, 3, "الرحمن الرحيم"),
    (1, 4, "ملك يوم الدين"),
    (1, 5, "اياك نعبد واياك نستعين"),
    (1, 6, "اهدنا الصرط المستقيم"),
    (1, 7, "صرط الذين انعمت عليهم غير المغضوب عليهم ولا الضالين"),
    (2, 0, OPENING),
    (2, 1, "الم"),
    (2, 2, "ذلك الكتب لا ريب فيه هدى للمتقين"),
    (2, 3, "الذين يؤمنون بالغيب ويقيمون الصلوة ومما رزقنهم ينفقون"),
    (2, 4, "والذين يؤمنون بما انزل اليك وما انزل من قبلك وبالاخرة هم يوقنون"),
    (2, 5, "اولئك على هدى من ربهم واولئك هم المفلحون"),
    (3, 0, OPENING),
    (3, 1, "الم"),
    (3, 2, "الله لا اله الا هو الحي القيوم"),
    (55, 0, OPENING),
    (55, 1, "الرحمن"),
    (55, 2, "علم القرءان"),
    (55, 3, "خلق الانسن"),
    (55, 4, "علمه البيان"),
    (55, 5, "الشمس والقمر بحسبان"),
    (55, 6, "والنجم والشجر يسجدان"),
    (55, 7, "والسماء رفعها ووضع الميزان"),
    (55, 8, "الا تطغوا في الميزان"),
    (55, 9, "واقيموا الوزن بالقسط ولا تخسروا الميزان"),
    (55, 10, "والارض وضعها للانام"),
    (55, 11, "فيها فكهة والنخل ذات الاكمام"),
    (55, 12, "والحب ذو العصف والريحان"),
    (55, 13, "فباي ءالاء ربكما تكذبان"),
    (55, 14, "خلق الانسن من صلصل كالفخار"),
    (55, 15, "وخلق الجان من مارج من نار"),
    (55, 16, "فباي ءالاء ربكما تكذبان"),
    (93, 0, OPENING),
    (93, 1, "والضحى"),
    (93, 2, "واليل اذا سجى"),
    (93, 3, "ما ودعك ربك وما قلى"),
    (93, 4, "وللاخرة خير لك من الاولى"),
    (93, 5, "ولسوف يعطيك ربك فترضى"),
    (93, 6, "الم يجدك يتيما فاوى"),
    (93, 7, "ووجدك ضالا فهدى"),
    (93, 8, "ووجدك عائلا فاغنى"),
    (93, 9, "فاما اليتيم فلا تقهر"),
    (93, 10, "واما السائل فلا تنهر"),
    (93, 11, "واما بنعمة ربك فحدث"),
    (94, 0, OPENING),
    (94, 1, "الم نشرح لك صدرك"),
    (94, 2, "ووضعنا عنك وزرك"),
    (94, 3, "الذي انقض ظهرك"),
    (94, 4, "ورفعنا لك ذكرك"),
    (94, 5, "فان مع العسر يسرا"),
    (94, 6, "ان مع العسر يسرا"),
    (94, 7, "فاذا فرغت فانصب"),
    (94, 8, "والى ربك فارغب"),
    (112, 0, "بِسۡمِ ٱللَّهِ ٱلرَّحۡمَٰنِ ٱلرَّحِيمِ"),
    (112, 1, "قُلۡ هُوَ ٱللَّهُ أَحَدٌ"),
    (112, 2, "ٱللَّهُ ٱلصَّمَدُ"),
    (112, 3, "لَمۡ يَلِدۡ وَلَمۡ يُولَدۡ"),
    (112, 4, "وَلَمۡ يَكُن لَّهُۥ كُفُوًا أَحَدٌۢ"),
];

lazy_static! {
    pub static ref INDEX: CorpusIndex = CorpusIndex::build(&corpus());
}

pub fn corpus() -> Corpus {
    init_tracing();
    Corpus::from_verses(VERSES.iter().copied()).expect("fixture corpus is valid")
}

/// Build a corpus from ad-hoc verses.
pub fn corpus_of(verses: &[(u16, u16, &str)]) -> Corpus {
    Corpus::from_verses(verses.iter().copied()).expect("valid corpus")
}

/// Normalized text of consecutive fixture verses joined by spaces.
pub fn passage(keys: &[(u16, u16)]) -> String {
    let corpus = corpus();
    keys.iter()
        .map(|&(c, v)| corpus.verse(c, v).expect("fixture verse").text_normalized.clone())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn init_tracing() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

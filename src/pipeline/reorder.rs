use crate::ir::{Lemma, PosTag};

pub const TIME_WORDS: [&str; 3] = ["today", "tomorrow", "yesterday"];
pub const NEGATION_LEMMA: &str = "not";

/// ISL constituent slot, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Constituent {
    Time,
    Object,
    Verb,
    Negation,
}

#[must_use]
pub fn classify(lemma: &Lemma, tag: PosTag) -> Constituent {
    let lower = lemma.as_str().to_lowercase();
    if TIME_WORDS.contains(&lower.as_str()) {
        Constituent::Time
    } else if tag == PosTag::Verb {
        Constituent::Verb
    } else if lemma.as_str() == NEGATION_LEMMA {
        // Only the literal lemma moves; "no" and "never" stay with the objects.
        Constituent::Negation
    } else {
        Constituent::Object
    }
}

/// Stable partition into Time ++ Object ++ Verb ++ Negation.
#[must_use]
pub fn reorder_for_isl(tagged: &[(Lemma, PosTag)]) -> Vec<Lemma> {
    let mut time = Vec::new();
    let mut object = Vec::new();
    let mut verb = Vec::new();
    let mut negation = Vec::new();

    for (lemma, tag) in tagged {
        let bucket = match classify(lemma, *tag) {
            Constituent::Time => &mut time,
            Constituent::Object => &mut object,
            Constituent::Verb => &mut verb,
            Constituent::Negation => &mut negation,
        };
        bucket.push(lemma.clone());
    }

    let mut out = Vec::with_capacity(tagged.len());
    out.extend(time);
    out.extend(object);
    out.extend(verb);
    out.extend(negation);
    out
}

use grawlix::{Censor, Grawlix, Morphology, Snowball, WordStore};

fn main() {
    let mut store = WordStore::new();
    for word in ["Morning", "work", "утро"] {
        store.add(word).unwrap();
    }

    // Stem English words too, not just Russian ones.
    let morphology = Morphology::new()
        .with(Snowball::russian())
        .with(Snowball::english());

    let words = store.snapshot();
    let mut censor = Censor::new(&words);
    censor
        .with_grawlix(Grawlix::new("#$@&%*!").unwrap())
        .with_normalizer(&morphology);

    let censored = censor.censor("Mornings at work, working утром");

    assert_eq!(censored, "#$@&%*!s at #$@&%*!, #$@&%*!ing #$@&%*!м");
    assert!(!censor.is_clean("working"));
}

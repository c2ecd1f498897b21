use grawlix::{Censor, ForbiddenWords};

fn main() {
    let words: ForbiddenWords = ["утро", "работа", "чай", "tea"].into_iter().collect();
    let censor = Censor::new(&words);

    // Clean text is unaffected.
    show_censor(&censor, "Добрый день!");

    // Forbidden words are censored, whatever their case.
    show_censor(&censor, "Доброе УтРо, tea time");

    // So are their inflected forms.
    show_censor(&censor, "Утром я выпью чая и пойду на работу");

    // Digits, underscores and punctuation stay.
    show_censor(&censor, "Утром1 я выпью чай_ и пойду на работу!");
}

fn show_censor(censor: &Censor<'_>, text: &str) {
    println!("{} -> {}", text, censor.censor(text));
}

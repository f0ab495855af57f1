use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let path_arg = |arg: clap::Arg| arg.value_parser(clap::value_parser!(std::path::PathBuf));

    let mut cmd = clap::Command::new("hamus")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Hamus Contributors")
        .about("Extract clickbait detection features from post and article datasets")
        .arg(path_arg(clap::arg!(<INSTANCES> "Instances file (JSON lines, one record per line)")))
        .arg(path_arg(clap::arg!(-t --truth <FILE> "Truth file joined on record id")))
        .arg(path_arg(clap::arg!(-o --output <FILE> "Output file (default: stdout)")))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (csv, json)")
                .value_name("FORMAT")
                .default_value("csv")
                .value_parser(["csv", "json"]),
        )
        .arg(clap::arg!(--pretty "Pretty print JSON output"))
        .arg(path_arg(clap::arg!(--"data-root" <DIR> "Directory media references are relative to")))
        .arg(path_arg(clap::arg!(--tesseract <PATH> "Tesseract executable")))
        .arg(clap::arg!(--"no-ocr" "Skip OCR; post images count as empty"))
        .arg(
            clap::arg!(--families <LIST> "Feature families to compute, comma separated")
                .value_delimiter(',')
                .value_parser(["character", "word", "pos", "sentiment"]),
        )
        .arg(clap::arg!(--"remove-stopwords" "Drop stopwords from word and tag counts"))
        .arg(clap::arg!(--"drop-digits" "Drop cardinal numbers from word and tag counts"))
        .arg(path_arg(clap::arg!(--dictionary <PATH> "WordNet dictionary directory or lemma list")))
        .arg(path_arg(clap::arg!(--lexicon <FILE> "Sentiment lexicon (VADER layout)")))
        .arg(path_arg(clap::arg!(--stopwords <FILE> "Extra stopwords, one per line")))
        .arg(path_arg(clap::arg!(--resources <DIR> "Directory searched for resources")))
        .arg(clap::arg!(--threads <NUM> "Worker threads (default: one per core)"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "hamus", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "hamus", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "hamus", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "hamus", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}

use granary_langs::Language;

pub fn run() {
    for language in Language::all() {
        let declaration = match language {
            Language::Cpp | Language::CSharp => "@namespace { ... }",
            Language::Go | Language::Java => "package in @header",
            Language::Ruby => "module in header",
            _ => "-",
        };

        println!("{:<12} {}", language.to_string(), declaration);
    }
}

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

fn write_test(file: &mut File, path: &Path, should_parse: bool) {
    let name = path.file_stem().unwrap().to_str().unwrap();
    let content = fs::read_to_string(path).unwrap();

    write!(
        file,
        r##"
#[test]
fn test_{name}() {{
    const CODE: &str = r#"
{content}
"#;
    let result = parse_program(CODE);

    match {should_parse} {{
        true => {{
            let program = result.unwrap();

            for width in [10, 40, 80] {{
                let printed = to_string(&program.to_pretty(), Some(width), 4);
                let reparsed = parse_program(&printed);

                assert!(reparsed.is_ok(), "Printed program does not parse:\n{{}}", printed);
                assert_eq!(program, reparsed.unwrap());
            }}

            for definition in program.iter() {{
                if let Definition::Data(data) = definition {{
                    let mut unifier = Unifier::new();

                    for (_, signature) in data.constructor_signatures() {{
                        let signature = rename_apart(&signature);
                        let application = unifier.fresh_arrow();
                        let unified = unifier.unify(&signature, &application);

                        // Nullary constructors are not functions.
                        assert_eq!(unified.is_ok(), matches!(signature, Type::Arrow(..)));
                    }}
                }}
            }}
        }}
        false => {{
            assert!(result.is_err());
        }}
    }}
}}
"##
    )
    .unwrap();
}

fn main() {
    println!("cargo:rerun-if-changed=material/tests");

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("tests_gen.rs");
    let mut dest_file = File::create(dest_path).unwrap();

    let should_fail_parser = [
        "illegal_character.fl",
        "missing_semicolon.fl",
        "unclosed_comment.fl",
        "unterminated_case.fl",
    ];

    let mut entries: Vec<_> = fs::read_dir("material/tests/")
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();

    for path in entries {
        let should_parse = !should_fail_parser.contains(&path.file_name().unwrap().to_str().unwrap());

        write_test(&mut dest_file, &path, should_parse);
    }
}

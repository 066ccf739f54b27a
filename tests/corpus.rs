use std::fs;
use std::path::Path;

use glob::glob;

fn load(path: &Path) -> String {
    let contents =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("could not read `{}`: {e}", path.display()));

    contents.replace("\r\n", "\n")
}

#[test]
fn valid_programs_are_accepted() {
    let mut checked = 0;

    for entry in glob("tests/programs/valid/*.tpl").unwrap() {
        let path = entry.unwrap();
        let contents = load(&path);

        if let Err(e) = tplcheck::validate(&contents) {
            panic!("`{}` was rejected: {e}", path.display());
        }

        checked += 1;
    }

    assert!(checked > 0, "no valid programs found");
}

#[test]
fn invalid_programs_are_rejected() {
    let mut checked = 0;

    for entry in glob("tests/programs/invalid/*.tpl").unwrap() {
        let path = entry.unwrap();
        let contents = load(&path);

        if tplcheck::validate(&contents).is_ok() {
            panic!("`{}` was accepted", path.display());
        }

        checked += 1;
    }

    assert!(checked > 0, "no invalid programs found");
}

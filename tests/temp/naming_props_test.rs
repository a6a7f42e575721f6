/*!
 * Naming Property Tests
 * Decoration always survives into generated names
 */

use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use temp_tracker::temp::{NameGenerator, ResourceKind, ResourceRequest};

fn generator() -> NameGenerator {
    NameGenerator::new(PathBuf::from("/scratch"), "f-".into(), "d-".into())
}

proptest! {
    #[test]
    fn prop_decoration_is_preserved(
        prefix in "[a-zA-Z0-9_.-]{0,16}",
        suffix in "[a-zA-Z0-9_.-]{0,16}",
        dir in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
    ) {
        let request = ResourceRequest::new()
            .prefix(prefix.clone())
            .suffix(suffix.clone())
            .dir(dir.clone());
        prop_assert!(request.validate().is_ok());

        let path = generator().generate(&request, ResourceKind::File);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        let expected_dir = PathBuf::from(&dir);
        prop_assert_eq!(path.parent().unwrap(), expected_dir.as_path());
        prop_assert!(name.starts_with(&prefix));
        prop_assert!(name.ends_with(&suffix));
    }

    #[test]
    fn prop_separators_rejected(
        head in "[a-z]{0,4}",
        tail in "[a-z]{0,4}",
    ) {
        let request = ResourceRequest::new().prefix(format!("{}/{}", head, tail));
        prop_assert!(request.validate().is_err());
    }

    #[test]
    fn prop_repeated_generation_distinct(count in 2usize..200) {
        let names = generator();
        let request = ResourceRequest::from("same");
        let paths: HashSet<PathBuf> = (0..count)
            .map(|_| names.generate(&request, ResourceKind::Directory))
            .collect();
        prop_assert_eq!(paths.len(), count);
    }
}

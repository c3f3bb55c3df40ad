use cookies::store::{FileDriver, MemoryDriver, Store, StoreError};
use std::fs;

#[test]
fn test_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.kv");
    fs::write(&path, "# cookie jar\nflavour=chocolate chip\ncount=12\n").unwrap();

    let mut s = Store::new();
    s.set_driver(Box::new(FileDriver::new(&path)));
    s.load().unwrap();

    assert_eq!(s.get("flavour"), Some("chocolate chip"));
    assert_eq!(s.get_parsed::<u32>("count").unwrap().unwrap(), 12);

    s.set("count", "11").unwrap();
    s.save().unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "count=11\nflavour=chocolate chip\n"
    );
}

#[test]
fn test_copy_between_drivers() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = FileDriver::new(dir.path().join("copy.kv"));

    let mut s = Store::new();
    s.set("a", "1").unwrap();
    s.set("b", "two words").unwrap();
    s.save_via_driver(&mut file).unwrap();

    let mut copy = Store::new();
    copy.load_via_driver(&file).unwrap();
    assert_eq!(copy.len(), 2);
    assert_eq!(copy.get("b"), Some("two words"));

    let mut mem = MemoryDriver::new();
    copy.save_via_driver(&mut mem).unwrap();
    let mut again = Store::new();
    again.load_via_driver(&mem).unwrap();
    assert_eq!(again.get("a"), Some("1"));
}

#[test]
fn test_bad_file_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.kv");
    fs::write(&path, "good=1\nnot a pair\n").unwrap();

    let mut s = Store::new();
    s.set("kept", "yes").unwrap();
    let err = s.load_via_driver(&FileDriver::new(&path)).unwrap_err();

    assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    assert_eq!(s.get("kept"), Some("yes"));
}

#[test]
fn test_saved_file_always_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strict.kv");
    let mut file = FileDriver::new(&path);

    let mut s = Store::new();
    s.set("k", "abc\r").unwrap();
    let err = s.save_via_driver(&mut file).unwrap_err();
    assert!(matches!(err, StoreError::InvalidValue(ref k) if k == "k"));
    assert!(!path.exists());

    let unchecked = Store::from_map([("k".to_string(), "a\nb".to_string())].into_iter().collect());
    assert!(matches!(
        unchecked.save_via_driver(&mut file),
        Err(StoreError::InvalidValue(_))
    ));
    assert!(!path.exists());

    s.set("k", "a\rb").unwrap();
    s.save_via_driver(&mut file).unwrap();
    let mut back = Store::new();
    back.load_via_driver(&file).unwrap();
    assert_eq!(back.get("k"), Some("a\rb"));
}

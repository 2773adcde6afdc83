use crate::Colors;

#[test]
fn off_is_default() {
    let colors = Colors::default();
    assert!(!colors.is_enabled());
    assert_eq!(colors, Colors::OFF);
    assert_eq!(colors.fault, "");
    assert_eq!(colors.reset, "");
}

#[test]
fn new_selects_palette() {
    assert_eq!(Colors::new(true), Colors::ON);
    assert!(Colors::new(true).is_enabled());
    assert!(!Colors::new(false).is_enabled());
    assert_eq!(Colors::new(true).fault, "\x1b[31m");
}

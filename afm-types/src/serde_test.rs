//! ensure serde is working as expected

use super::*;

#[test]
fn test_serde() {
    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
    struct MyTypes {
        width: CharWidth,
        missing: CharWidth,
        kern: KernValue,
        be: BigEndian<u16>,
    }

    let my_instance = MyTypes {
        width: CharWidth::new(40),
        missing: CharWidth::MISSING,
        kern: KernValue::new(-5),
        be: BigEndian::from(0x152u16),
    };

    let dumped = serde_json::to_string(&my_instance).unwrap();
    let loaded: MyTypes = serde_json::from_str(&dumped).unwrap();
    assert_eq!(my_instance, loaded)
}

use crate::case::to_lower_underscore;

#[test]
fn lower_underscore() {
    assert_eq!("abcdef", to_lower_underscore("abcdef"));
    assert_eq!("ab_cd_ef", to_lower_underscore("AbCdEf"));
    assert_eq!("ab_cd_ef", to_lower_underscore("abCdEf"));
    assert_eq!("ab_cd_ef", to_lower_underscore("ab_cd_ef"));
    assert_eq!("hello_world", to_lower_underscore("HelloWorld"));
}

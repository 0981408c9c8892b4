use sliceobytes::AsLiteral;

pub struct RenderTestCase {
    pub input: Vec<u8>,
    pub output: &'static str,
}

pub fn test_byte_case(test: RenderTestCase) -> anyhow::Result<()> {
    // Given
    let RenderTestCase { input, output } = test;

    // When
    let dump_lines = input.as_literal().dump_to::<Vec<String>>()?;
    let dump = dump_lines.join("");

    // Then
    similar_asserts::assert_eq!(
        output,
        dump.as_str(),
        "literal output did not equal expected value"
    );
    Ok(())
}

#[macro_export]
macro_rules! byte_tests {
    ($($name:ident: $value:expr,)*) => {
    $(
        #[test]
        fn $name() -> anyhow::Result<()> {
            crate::common::test_byte_case($value)
        }
    )*
    };
}

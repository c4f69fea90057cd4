//! Cross-stage property tests
//!
//! Checks the properties that hold over any accepted program: canonical
//! printing is a fixed point under re-parsing, token lines never decrease,
//! and every generated instruction set validates and ends with `leave`.

use parser::lexer::TokenKind;
use parser::{print, BytecodeGenerator, Lexer, Parser};

const CORPUS: &[&str] = &[
    "a = 1",
    "a = 1 + 2 * 3 ** 4",
    "@state = nil",
    "self.foo(1, \"two\", 3.5)",
    "class Bar\ndef self.foo\n10\nend\nend\nclass Foo < Bar; end\nBar.foo",
    "module Baz\nclass Bar\ndef bar\nFoo.new.bar\nend\nend\nend",
    "def baz(z)\nbar(z + 100) do |b|\nyield(b)\nend\nend",
    "def bar(block)\nblock.call + get_block.call\nend",
    "if a == b && c\nfoo\nelse\nbar\nend",
    "while i < 10 do\ni = i + 1\nend",
    "x = true || false\n!x",
];

#[test]
fn test_canonical_print_is_a_fixed_point() {
    for source in CORPUS {
        let once = print(&Parser::new(source).parse_program().expect(source));
        let twice = print(&Parser::new(&once).parse_program().expect(source));
        assert_eq!(once, twice, "printing {:?} is not a fixed point", source);
    }
}

#[test]
fn test_token_lines_never_decrease() {
    for source in CORPUS {
        let mut lexer = Lexer::new(source);
        let mut previous = 1;
        loop {
            let token = lexer.next_token();
            assert!(
                token.line >= previous,
                "line went backwards at {:?} in {:?}",
                token.literal,
                source
            );
            previous = token.line;
            if token.kind == TokenKind::Eof {
                break;
            }
        }
    }
}

#[test]
fn test_generated_sets_are_well_formed() {
    for source in CORPUS {
        let program = Parser::new(source).parse_program().expect(source);
        let sets = BytecodeGenerator::new().generate(&program).expect(source);
        assert_eq!(sets[0].name, "ProgramStart");
        for set in &sets {
            assert!(
                set.validate().is_ok(),
                "set {} of {:?} failed validation",
                set.name,
                source
            );
            assert_eq!(
                set.instructions.last().map(|i| i.action.as_str()),
                Some("leave"),
                "set {} of {:?} does not end with leave",
                set.name,
                source
            );
            for (index, instruction) in set.instructions.iter().enumerate() {
                assert_eq!(instruction.line, index);
            }
        }
    }
}

#[test]
fn test_reparsing_canonical_output_compiles_identically() {
    for source in CORPUS {
        let program = Parser::new(source).parse_program().expect(source);
        let canonical = print(&program);
        let reparsed = Parser::new(&canonical).parse_program().expect(source);
        let original_sets = BytecodeGenerator::new().generate(&program).expect(source);
        let reparsed_sets = BytecodeGenerator::new().generate(&reparsed).expect(source);
        assert_eq!(
            original_sets.len(),
            reparsed_sets.len(),
            "set count diverged for {:?}",
            source
        );
    }
}

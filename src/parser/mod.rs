use crate::ast::{Document, Mapping, Value};
use crate::lexer::Lexer;
use crate::ConfigError;

mod document;
mod value;

pub use value::parse_value;

/// Where a scope's mapping lands in its parent once the scope closes.
#[derive(Debug)]
enum Slot {
    Root,
    Key(String),
    Instance { group: String, id: String },
}

/// One open block. The root frame has no indent, so indentation never closes it.
#[derive(Debug)]
struct Frame {
    mapping: Mapping,
    indent: Option<usize>,
    slot: Slot,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    scopes: Vec<Frame>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            scopes: vec![Frame {
                mapping: Mapping::new(),
                indent: None,
                slot: Slot::Root,
            }],
        }
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    /// Mapping of the innermost open scope.
    pub(crate) fn current(&mut self) -> &mut Mapping {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last].mapping
    }

    fn push_scope(&mut self, indent: usize, slot: Slot) {
        log::trace!("open scope {:?} at indent {} (line {})", slot, indent, self.line());
        self.scopes.push(Frame {
            mapping: Mapping::new(),
            indent: Some(indent),
            slot,
        });
    }

    /// Close every scope opened at an indent >= `indent`.
    fn close_scopes(&mut self, indent: usize) {
        while let Some(Frame { indent: Some(top), .. }) = self.scopes.last() {
            if indent > *top {
                break;
            }
            self.pop_scope();
        }
    }

    /// Pop the innermost scope and store its mapping in the parent.
    fn pop_scope(&mut self) {
        if self.scopes.len() < 2 {
            return;
        }
        let Some(frame) = self.scopes.pop() else {
            return;
        };
        log::trace!("close scope {:?}", frame.slot);

        let parent = self.current();
        match frame.slot {
            Slot::Key(name) => {
                parent.insert(name, Value::Mapping(frame.mapping));
            }
            Slot::Instance { group, id } => {
                if let Some(Value::Mapping(container)) = parent.get_mut(&group) {
                    container.insert(id, Value::Mapping(frame.mapping));
                }
            }
            Slot::Root => {}
        }
    }

    /// Close all scopes and hand back the root.
    fn finish(&mut self) -> Document {
        while self.scopes.len() > 1 {
            self.pop_scope();
        }
        Document::from(std::mem::take(self.current()))
    }

    pub fn parse_document(&mut self) -> Result<Document, ConfigError> {
        document::parse_document(self)
    }
}

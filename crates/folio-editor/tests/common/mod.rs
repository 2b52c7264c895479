use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::model::{Block, BlockDocument};
use folio_editor::{AdapterError, Callbacks, Change, EditorWidget, WidgetError};

/// What the fake widget shows and what the test observed.
#[derive(Debug, Default)]
pub struct WidgetState {
    /// Current content, as the user would see it.
    pub content: BlockDocument,
    pub initialized: usize,
    pub renders: Vec<BlockDocument>,
    pub destroyed: usize,
    pub saves: usize,
    pub fail_saves: bool,
    pub fail_renders: bool,
    /// Simulated serialization latency.
    pub save_delay: Option<Duration>,
    /// When set, every save appends a paragraph "edit N" first, so each
    /// snapshot is distinguishable.
    pub type_on_save: bool,
}

#[derive(Clone, Default)]
pub struct FakeWidget {
    pub state: Rc<RefCell<WidgetState>>,
}

impl FakeWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user typing a paragraph.
    pub fn type_paragraph(&self, text: &str) {
        self.state.borrow_mut().content.blocks.push(Block::paragraph(text));
    }
}

impl EditorWidget for FakeWidget {
    async fn initialize(&mut self, initial: &BlockDocument) -> Result<(), WidgetError> {
        let mut s = self.state.borrow_mut();
        s.initialized += 1;
        s.content = initial.clone();
        Ok(())
    }

    async fn save(&mut self) -> Result<BlockDocument, WidgetError> {
        let delay = self.state.borrow().save_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut s = self.state.borrow_mut();
        s.saves += 1;
        if s.fail_saves {
            return Err(WidgetError::new("block 2 is mid-mutation"));
        }
        if s.type_on_save {
            let n = s.saves;
            s.content.blocks.push(Block::paragraph(format!("edit {n}")));
        }
        Ok(s.content.clone())
    }

    async fn render(&mut self, value: &BlockDocument) -> Result<(), WidgetError> {
        let mut s = self.state.borrow_mut();
        if s.fail_renders {
            return Err(WidgetError::new("unsupported block"));
        }
        s.renders.push(value.clone());
        s.content = value.clone();
        Ok(())
    }

    fn destroy(&mut self) {
        self.state.borrow_mut().destroyed += 1;
    }
}

/// Everything the owner received through the callbacks.
#[derive(Clone, Default)]
pub struct Observed {
    pub changes: Rc<RefCell<Vec<Change>>>,
    pub errors: Rc<RefCell<Vec<AdapterError>>>,
}

impl Observed {
    pub fn callbacks(&self) -> Callbacks {
        let changes = Rc::clone(&self.changes);
        let errors = Rc::clone(&self.errors);
        Callbacks::new(move |c| changes.borrow_mut().push(c))
            .on_error(move |e| errors.borrow_mut().push(e.clone()))
    }
}

pub fn doc(texts: &[&str]) -> BlockDocument {
    BlockDocument::new(texts.iter().map(|t| Block::paragraph(*t)).collect())
}

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Date;

use samegame_core::{
    Phase, Removal, Session, TileKind, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TILE_KINDS,
};

pub(crate) const BOARD_COLS: usize = DEFAULT_COLS;
pub(crate) const BOARD_ROWS: usize = DEFAULT_ROWS;
pub(crate) const TILE_KINDS: u8 = DEFAULT_TILE_KINDS;
pub(crate) const CELL_SIZE: f32 = 32.0;

pub(crate) type GameSubscriber = Rc<dyn Fn()>;

#[derive(Clone)]
pub(crate) struct GameSnapshot {
    pub(crate) cols: usize,
    pub(crate) rows: usize,
    pub(crate) cells: Vec<Option<TileKind>>,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
}

pub(crate) struct GameCore {
    session: RefCell<Session>,
    snapshot: RefCell<GameSnapshot>,
    subscribers: Rc<RefCell<Vec<GameSubscriber>>>,
}

pub(crate) struct GameSubscription {
    subscriber: GameSubscriber,
    subscribers: Rc<RefCell<Vec<GameSubscriber>>>,
}

impl Drop for GameSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        if let Some(at) = subscribers
            .iter()
            .position(|entry| Rc::ptr_eq(entry, &self.subscriber))
        {
            subscribers.remove(at);
        }
    }
}

thread_local! {
    static SHARED_CORE: RefCell<Option<Rc<GameCore>>> = RefCell::new(None);
}

impl GameCore {
    pub(crate) fn new() -> Rc<Self> {
        let session = Session::new(BOARD_COLS, BOARD_ROWS, TILE_KINDS, current_seed());
        let snapshot = build_snapshot(&session);
        Rc::new(Self {
            session: RefCell::new(session),
            snapshot: RefCell::new(snapshot),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn shared() -> Rc<Self> {
        SHARED_CORE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(core) = slot.as_ref() {
                return Rc::clone(core);
            }
            let core = GameCore::new();
            *slot = Some(Rc::clone(&core));
            core
        })
    }

    pub(crate) fn subscribe(&self, subscriber: GameSubscriber) -> GameSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        GameSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn snapshot(&self) -> GameSnapshot {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn new_game(&self) {
        let session = Session::new(BOARD_COLS, BOARD_ROWS, TILE_KINDS, current_seed());
        *self.session.borrow_mut() = session;
        self.refresh();
        self.notify();
    }

    pub(crate) fn activate_cell(&self, x: usize, y: usize) -> Option<Removal> {
        let removal = self.session.borrow_mut().activate(x, y)?;
        self.refresh();
        self.notify();
        Some(removal)
    }

    fn refresh(&self) {
        let session = self.session.borrow();
        *self.snapshot.borrow_mut() = build_snapshot(&session);
    }

    fn notify(&self) {
        let subscribers: Vec<GameSubscriber> = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber();
        }
    }
}

fn build_snapshot(session: &Session) -> GameSnapshot {
    let board = session.board();
    GameSnapshot {
        cols: board.cols(),
        rows: board.rows(),
        cells: board.cells().iter().map(|cell| cell.kind()).collect(),
        score: session.score(),
        game_over: session.phase() == Phase::GameOver,
    }
}

fn current_seed() -> u32 {
    #[cfg(target_arch = "wasm32")]
    {
        // f64 -> u32 saturates for epoch millis; truncate through u64.
        Date::now() as u64 as u32
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u32)
            .unwrap_or(0)
    }
}

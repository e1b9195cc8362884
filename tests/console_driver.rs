//! Console driver against an in-memory buffer and a recording port bus.

use tiny_rt::arch::PortBus;
use tiny_rt::config::{
    CELL_COUNT, CRTC_DATA_PORT, CRTC_INDEX_PORT, VGA_DEFAULT_COLOR, VGA_HEIGHT, VGA_WIDTH,
};
use tiny_rt::console::{
    CellBuffer, ColorCode, Console, MemoryCellBuffer, TextModeBuffer, VgaColor, decode_cell,
};
use tiny_rt::{ConsoleConfig, ConsoleError};

/// Records every data-port write together with the register selected at
/// the time; reads return `0xff` so read-modify-write is observable.
#[derive(Debug, Default)]
struct RecordingBus {
    selected: Option<u8>,
    index_writes: usize,
    data_writes: Vec<(u8, u8)>,
}

impl PortBus for RecordingBus {
    fn read_u8(&mut self, _port: u16) -> u8 {
        0xff
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        match port {
            CRTC_INDEX_PORT => {
                self.selected = Some(value);
                self.index_writes += 1;
            }
            CRTC_DATA_PORT => {
                let register = self.selected.expect("data write before index write");
                self.data_writes.push((register, value));
            }
            other => panic!("unexpected port {:#x}", other),
        }
    }
}

fn console() -> Console<MemoryCellBuffer, RecordingBus> {
    Console::new(MemoryCellBuffer::new(), RecordingBus::default())
}

#[test]
fn move_cursor_five_two() {
    let mut console = console();
    console.move_cursor(5, 2);
    let bus = console.bus();
    assert_eq!(bus.index_writes, 2);
    assert_eq!(bus.data_writes, [(0x0f, 165u16 as u8), (0x0e, (165u16 >> 8) as u8)]);
}

#[test]
fn move_cursor_high_byte_in_use() {
    let mut console = console();
    console.move_cursor(10, 20);
    let pos: u16 = 20 * 80 + 10;
    assert_eq!(
        console.bus().data_writes,
        [(0x0f, pos as u8), (0x0e, (pos >> 8) as u8)]
    );
}

#[test]
fn put_char_color_at_origin() {
    let mut console = console();
    unsafe { console.put_char_color(b'A', ColorCode::from_raw(0x0f), 0, 0) };
    assert_eq!(console.buffer().read_cell(0), Ok(0x0f41));
    assert!(console.bus().data_writes.is_empty());
}

#[test]
fn clear_leaves_default_blank_everywhere() {
    let mut console = console();
    console
        .try_put_char_color(b'#', ColorCode::new(VgaColor::Red, VgaColor::White), 40, 12)
        .unwrap();
    console.clear();
    let blank = (u16::from(VGA_DEFAULT_COLOR) << 8) | u16::from(b' ');
    assert_eq!(console.buffer().cells().len(), CELL_COUNT);
    assert!(console.buffer().cells().iter().all(|&cell| cell == blank));
}

#[test]
fn enable_cursor_preserves_unowned_bits() {
    let mut console = console();
    console.enable_cursor(0, 15);
    assert_eq!(console.bus().data_writes, [(0x0a, 0xc0), (0x0b, 0xef)]);
}

#[test]
fn disable_cursor_is_a_single_register_write() {
    let mut console = console();
    console.disable_cursor();
    assert_eq!(console.bus().index_writes, 1);
    assert_eq!(console.bus().data_writes, [(0x0a, 0x20)]);
}

#[test]
fn init_clears_then_enables_cursor() {
    let config = ConsoleConfig::new().with_cursor_shape(0, 15);
    let mut console = Console::with_config(MemoryCellBuffer::new(), RecordingBus::default(), config);
    console.init();
    assert_eq!(console.read_cell(VGA_WIDTH - 1, VGA_HEIGHT - 1), Ok(0x0720));
    assert_eq!(console.bus().data_writes, [(0x0a, 0xc0), (0x0b, 0xef)]);
}

#[test]
fn checked_writes_reject_every_edge() {
    let mut console = console();
    for (x, y) in [(VGA_WIDTH, 0), (0, VGA_HEIGHT), (usize::MAX, usize::MAX)] {
        assert_eq!(
            console.try_put_char_color(b'x', ColorCode::normal(), x, y),
            Err(ConsoleError::InvalidPosition { x, y })
        );
        assert_eq!(
            console.try_move_cursor(x, y),
            Err(ConsoleError::InvalidPosition { x, y })
        );
    }
    assert!(console.bus().data_writes.is_empty());

    console.try_put_char_color(b'z', ColorCode::normal(), VGA_WIDTH - 1, VGA_HEIGHT - 1).unwrap();
    let (ch, color) = decode_cell(console.read_cell(VGA_WIDTH - 1, VGA_HEIGHT - 1).unwrap());
    assert_eq!((ch, color), (b'z', ColorCode::normal()));
}

#[test]
fn console_over_mapped_text_buffer() {
    let mut backing = vec![0u16; CELL_COUNT];
    let buffer = unsafe { TextModeBuffer::at(backing.as_mut_ptr() as usize) }.unwrap();
    let mut console = Console::new(buffer, RecordingBus::default());
    console.clear();
    console.put_str_color(b"ok", ColorCode::normal(), 0, 1).unwrap();
    let (buffer, _bus) = console.into_parts();
    drop(buffer);

    assert_eq!(backing[VGA_WIDTH], 0x0700 | u16::from(b'o'));
    assert_eq!(backing[VGA_WIDTH + 1], 0x0700 | u16::from(b'k'));
    assert_eq!(backing[0], 0x0720);
}

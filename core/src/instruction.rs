use crate::error::{Chip8Error, Result};

/// A decoded opcode.
///
/// Register operands are register numbers (`x`, `y`), not register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 00FD
    Exit,
    /// 00FE
    LowResolution,
    /// 00FF
    HighResolution,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqual(u8, u8),
    /// 4XNN
    SkipNotEqual(u8, u8),
    /// 5XY0
    SkipRegistersEqual(u8, u8),
    /// 6XNN
    Load(u8, u8),
    /// 7XNN
    Add(u8, u8),
    /// 8XY0
    Move(u8, u8),
    /// 8XY1
    Or(u8, u8),
    /// 8XY2
    And(u8, u8),
    /// 8XY3
    Xor(u8, u8),
    /// 8XY4
    AddRegisters(u8, u8),
    /// 8XY5
    Sub(u8, u8),
    /// 8XY6
    ShiftRight(u8, u8),
    /// 8XY7
    SubReversed(u8, u8),
    /// 8XYE
    ShiftLeft(u8, u8),
    /// 9XY0
    SkipRegistersNotEqual(u8, u8),
    /// ANNN
    LoadIndex(u16),
    /// BNNN; `x` is the high nibble of NNN, used as the offset register by SCHIP
    JumpOffset(u8, u16),
    /// CXNN
    Random(u8, u8),
    /// DXYN
    Draw(u8, u8, u8),
    /// EX9E
    SkipKeyPressed(u8),
    /// EXA1
    SkipKeyNotPressed(u8),
    /// FX07
    ReadDelay(u8),
    /// FX0A
    WaitKey(u8),
    /// FX15
    SetDelay(u8),
    /// FX18
    SetSound(u8),
    /// FX1E
    AddIndex(u8),
    /// FX29
    LoadGlyph(u8),
    /// FX33
    StoreBcd(u8),
    /// FX55
    StoreRegisters(u8),
    /// FX65
    LoadRegisters(u8),
}

/// The operand fields of an opcode word, split once per decode.
///
/// `kind` is the top nibble; the remaining fields overlap, and which of them carry data depends
/// on the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields {
    kind: u8,
    x: u8,
    y: u8,
    n: u8,
    nn: u8,
    nnn: u16,
}

impl From<u16> for Fields {
    fn from(op: u16) -> Self {
        Fields {
            kind: (op >> 12) as u8,
            x: ((op >> 8) & 0xF) as u8,
            y: ((op >> 4) & 0xF) as u8,
            n: (op & 0xF) as u8,
            nn: (op & 0xFF) as u8,
            nnn: op & 0xFFF,
        }
    }
}

impl Instruction {
    /// Selects the Instruction for a given opcode.
    pub fn decode(op: u16) -> Result<Self> {
        let Fields {
            kind,
            x,
            y,
            n,
            nn,
            nnn,
        } = Fields::from(op);
        let instruction = match (kind, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Self::Clear,
            (0x0, 0x0, 0xE, 0xE) => Self::Return,
            (0x0, 0x0, 0xF, 0xD) => Self::Exit,
            (0x0, 0x0, 0xF, 0xE) => Self::LowResolution,
            (0x0, 0x0, 0xF, 0xF) => Self::HighResolution,
            (0x1, ..) => Self::Jump(nnn),
            (0x2, ..) => Self::Call(nnn),
            (0x3, ..) => Self::SkipEqual(x, nn),
            (0x4, ..) => Self::SkipNotEqual(x, nn),
            (0x5, .., 0x0) => Self::SkipRegistersEqual(x, y),
            (0x6, ..) => Self::Load(x, nn),
            (0x7, ..) => Self::Add(x, nn),
            (0x8, .., 0x0) => Self::Move(x, y),
            (0x8, .., 0x1) => Self::Or(x, y),
            (0x8, .., 0x2) => Self::And(x, y),
            (0x8, .., 0x3) => Self::Xor(x, y),
            (0x8, .., 0x4) => Self::AddRegisters(x, y),
            (0x8, .., 0x5) => Self::Sub(x, y),
            (0x8, .., 0x6) => Self::ShiftRight(x, y),
            (0x8, .., 0x7) => Self::SubReversed(x, y),
            (0x8, .., 0xE) => Self::ShiftLeft(x, y),
            (0x9, .., 0x0) => Self::SkipRegistersNotEqual(x, y),
            (0xA, ..) => Self::LoadIndex(nnn),
            (0xB, ..) => Self::JumpOffset(x, nnn),
            (0xC, ..) => Self::Random(x, nn),
            (0xD, ..) => Self::Draw(x, y, n),
            (0xE, .., 0x9, 0xE) => Self::SkipKeyPressed(x),
            (0xE, .., 0xA, 0x1) => Self::SkipKeyNotPressed(x),
            (0xF, .., 0x0, 0x7) => Self::ReadDelay(x),
            (0xF, .., 0x0, 0xA) => Self::WaitKey(x),
            (0xF, .., 0x1, 0x5) => Self::SetDelay(x),
            (0xF, .., 0x1, 0x8) => Self::SetSound(x),
            (0xF, .., 0x1, 0xE) => Self::AddIndex(x),
            (0xF, .., 0x2, 0x9) => Self::LoadGlyph(x),
            (0xF, .., 0x3, 0x3) => Self::StoreBcd(x),
            (0xF, .., 0x5, 0x5) => Self::StoreRegisters(x),
            (0xF, .., 0x6, 0x5) => Self::LoadRegisters(x),
            _ => return Err(Chip8Error::UnknownOpcode { opcode: op }),
        };
        Ok(instruction)
    }
}

//! Built-in demo programs.

use vcpu_bytecode::{Instruction, Program, Register};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    PushPop,
    Arith,
    Spin,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::PushPop, Demo::Arith, Demo::Spin];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Demo::PushPop => "push-pop",
            Demo::Arith => "arith",
            Demo::Spin => "spin",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::PushPop => "push 25, pop it into r5, then raise interrupt 0x21",
            Demo::Arith => "compute 6 * 7 - 2 through registers (r0 = 40)",
            Demo::Spin => "jump to itself forever; stopped by --fuel",
        }
    }

    pub fn program(self) -> Program {
        use Register::{R0, R1, R2, R5};

        let instructions = match self {
            Demo::PushPop => vec![
                Instruction::push(25),
                Instruction::pop(R5),
                Instruction::int(0x21),
            ],
            Demo::Arith => vec![
                Instruction::push(6),
                Instruction::pop(R0),
                Instruction::push(7),
                Instruction::pop(R1),
                Instruction::mul(R0, R1),
                Instruction::push(2),
                Instruction::pop(R2),
                Instruction::sub(R0, R2),
            ],
            Demo::Spin => vec![Instruction::jmp(0)],
        };
        instructions.into_iter().collect()
    }
}

/// Print the demo table.
pub fn run() {
    let width = Demo::ALL.iter().map(|d| d.name().len()).max().unwrap_or(0);
    for demo in Demo::ALL {
        println!("{:width$}  {}", demo.name(), demo.description());
    }
}

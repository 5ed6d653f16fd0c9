use eyre::Result;

use crate::{
    operation::Operation,
    rpc::RPC,
    skeleton::TransactionSkeleton,
};

pub mod predefined;

/// Instruction is a collection of operations that can be executed in sequence, to assemble transaction skeleton
pub struct Instruction<T: RPC> {
    operations: Vec<Box<dyn Operation<T>>>,
}

impl<T: RPC> Instruction<T> {
    pub fn new(operations: Vec<Box<dyn Operation<T>>>) -> Self {
        Instruction { operations }
    }

    /// Execute all operations in sequence to assemble transaction skeleton
    pub async fn run(self, rpc: &T, skeleton: &mut TransactionSkeleton) -> Result<()> {
        for operation in self.operations {
            operation.run(rpc, skeleton).await?;
        }
        Ok(())
    }
}

/// Take responsibility for executing instructions and then assemble transaction skeleton
pub struct TransactionCalculator<T: RPC> {
    instructions: Vec<Instruction<T>>,
}

impl<T: RPC> Default for TransactionCalculator<T> {
    fn default() -> Self {
        TransactionCalculator {
            instructions: Vec::new(),
        }
    }
}

impl<T: RPC> TransactionCalculator<T> {
    pub fn instruction(&mut self, instruction: Instruction<T>) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub async fn new_skeleton(self, rpc: &T) -> Result<TransactionSkeleton> {
        let mut skeleton = TransactionSkeleton::default();
        for instruction in self.instructions {
            instruction.run(rpc, &mut skeleton).await?;
        }
        Ok(skeleton)
    }
}

use std::sync::Arc;

use crate::{
    address::{ObjectId, SuiAddress},
    changes::TransactionBlockResponse,
    rpc::{
        ExecuteTransactionRequestType, Rpc, TransactionBlockBytes, TransactionBlockResponseOptions,
        RPC,
    },
};

pub type FnUnsafePublish = Box<
    dyn Fn(SuiAddress, Vec<String>, Vec<ObjectId>, Option<ObjectId>, u64) -> TransactionBlockBytes
        + Send
        + Sync,
>;
pub type FnExecuteTransactionBlock = Box<
    dyn Fn(
            String,
            Vec<String>,
            TransactionBlockResponseOptions,
            ExecuteTransactionRequestType,
        ) -> TransactionBlockResponse
        + Send
        + Sync,
>;

#[derive(Clone, Default)]
pub struct FakeRpcClient {
    pub method_unsafe_publish: Option<Arc<FnUnsafePublish>>,
    pub method_execute_transaction_block: Option<Arc<FnExecuteTransactionBlock>>,
}

impl FakeRpcClient {
    /// Fake node that accepts any publish and answers execution with `response`
    pub fn with_response(tx_bytes: &str, response: TransactionBlockResponse) -> Self {
        let tx_bytes = tx_bytes.to_string();
        let unsafe_publish: FnUnsafePublish =
            Box::new(move |_, _, _, _, _| TransactionBlockBytes {
                tx_bytes: tx_bytes.clone(),
                ..Default::default()
            });
        let execute_transaction_block: FnExecuteTransactionBlock =
            Box::new(move |_, _, _, _| response.clone());
        FakeRpcClient {
            method_unsafe_publish: Some(Arc::new(unsafe_publish)),
            method_execute_transaction_block: Some(Arc::new(execute_transaction_block)),
        }
    }
}

impl RPC for FakeRpcClient {
    fn url(&self) -> String {
        "fake://sui".to_string()
    }

    fn unsafe_publish(
        &self,
        sender: SuiAddress,
        modules: Vec<String>,
        dependencies: Vec<ObjectId>,
        gas: Option<ObjectId>,
        gas_budget: u64,
    ) -> Rpc<TransactionBlockBytes> {
        let Some(unsafe_publish) = self.method_unsafe_publish.clone() else {
            unimplemented!("fake unsafe_publish method")
        };
        Box::pin(async move { Ok(unsafe_publish(sender, modules, dependencies, gas, gas_budget)) })
    }

    fn execute_transaction_block(
        &self,
        tx_bytes: String,
        signatures: Vec<String>,
        options: TransactionBlockResponseOptions,
        request_type: ExecuteTransactionRequestType,
    ) -> Rpc<TransactionBlockResponse> {
        let Some(execute_transaction_block) = self.method_execute_transaction_block.clone() else {
            unimplemented!("fake execute_transaction_block method")
        };
        Box::pin(async move {
            Ok(execute_transaction_block(
                tx_bytes,
                signatures,
                options,
                request_type,
            ))
        })
    }
}

//! 名前でオペレーションを引くレジストリ
//!
//! 起動時に一度だけ組み立て、以降は共有参照で呼び出すのでロックは持たない

use std::collections::BTreeMap;

use ndarray::Array3;

use crate::{
    backend::DecodeOptions,
    error::{Error, Result},
    op::{DecodeYuy2, Op, OpInputs},
};

type BoxedOp = Box<dyn Op + Send + Sync>;

#[derive(Default)]
pub struct Registry {
    ops: BTreeMap<String, BoxedOp>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みのオペレーションを登録済みのレジストリ
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        let op = DecodeYuy2::new(DecodeOptions::default());
        reg.ops.insert(DecodeYuy2::NAME.to_string(), Box::new(op));
        reg
    }

    pub fn register<O>(&mut self, name: impl Into<String>, op: O) -> Result<()>
    where
        O: Op + Send + Sync + 'static,
    {
        let name = name.into();
        if self.ops.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }
        tracing::debug!("register op: {name}");
        self.ops.insert(name, Box::new(op));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Op + Send + Sync)> {
        self.ops.get(name).map(|op| op.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    pub fn call(&self, name: &str, inputs: OpInputs<'_>) -> Result<Array3<u8>> {
        let op = self
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        op.compute(inputs).inspect_err(|e| {
            tracing::error!("{name} failed: {e}");
        })
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ops.keys()).finish()
    }
}

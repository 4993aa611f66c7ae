//! Local parameters attached to codecs and graphs.

use streamdump_types::SerializedLocalParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntParam {
    pub id: i32,
    pub value: i64,
}

/// Parameter whose bytes were copied into the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyParam {
    pub id: i32,
    pub size: u64,
    pub data: Vec<u8>,
}

/// Parameter recorded by reference only; the bytes are not in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefParam {
    pub id: i32,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalParams {
    pub ints: Vec<IntParam>,
    pub copies: Vec<CopyParam>,
    pub refs: Vec<RefParam>,
}

impl LocalParams {
    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.copies.is_empty() && self.refs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ints.len() + self.copies.len() + self.refs.len()
    }
}

impl From<SerializedLocalParams> for LocalParams {
    fn from(raw: SerializedLocalParams) -> Self {
        Self {
            ints: raw
                .int_params
                .into_iter()
                .map(|p| IntParam {
                    id: p.param_id,
                    value: p.param_value,
                })
                .collect(),
            copies: raw
                .copy_params
                .into_iter()
                .map(|p| CopyParam {
                    id: p.param_id,
                    size: p.param_size,
                    data: p.param_data,
                })
                .collect(),
            refs: raw
                .ref_params
                .into_iter()
                .map(|p| RefParam {
                    id: p.param_id,
                    size: p.param_size,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamdump_types::{SerializedCopyParam, SerializedIntParam};

    #[test]
    fn test_conversion_counts_every_kind() {
        let params = LocalParams::from(SerializedLocalParams {
            int_params: vec![SerializedIntParam {
                param_id: 1,
                param_value: -4,
            }],
            copy_params: vec![SerializedCopyParam {
                param_id: 2,
                param_size: 2,
                param_data: vec![7, 8],
            }],
            ref_params: vec![],
        });

        assert!(!params.is_empty());
        assert_eq!(params.len(), 2);
        assert_eq!(params.ints[0].value, -4);
        assert_eq!(params.copies[0].data, vec![7, 8]);
        assert!(LocalParams::default().is_empty());
    }
}

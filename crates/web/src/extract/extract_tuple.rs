use crate::error::WebError;
use crate::extract::from_request::FromRequest;
use crate::request::RequestContext;

/// Extracts left to right and stops at the first failure.
macro_rules! impl_from_request_for_tuple {
    ($($param:ident)*) => {
        impl<$($param,)*> FromRequest for ($($param,)*)
        where
            $($param: FromRequest,)*
        {
            fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
                Ok(($($param::from_request(req)?,)*))
            }
        }
    }
}

impl_from_request_for_tuple! { A }
impl_from_request_for_tuple! { A B }
impl_from_request_for_tuple! { A B C }
impl_from_request_for_tuple! { A B C D }
impl_from_request_for_tuple! { A B C D E }
impl_from_request_for_tuple! { A B C D E F }
impl_from_request_for_tuple! { A B C D E F G }
impl_from_request_for_tuple! { A B C D E F G H }

//! Outbound host bridge.

use std::rc::Rc;

use weld_common::HostMessage;

/// Fire-and-forget delivery of a message to the embedding host.
pub trait HostBridge: 'static {
    fn notify(&self, message: &HostMessage);
}

impl<B: HostBridge + ?Sized> HostBridge for Rc<B> {
    fn notify(&self, message: &HostMessage) {
        (**self).notify(message)
    }
}
